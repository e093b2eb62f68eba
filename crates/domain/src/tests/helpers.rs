// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DistrictEntry, ReferenceData, ReferenceEntry, ReferenceTables};

pub fn create_test_tables() -> ReferenceTables {
    ReferenceTables {
        regions: vec![ReferenceEntry::new(1, "Swan"), ReferenceEntry::new(2, "South West")],
        districts: vec![
            DistrictEntry {
                id: 10,
                region_id: 1,
                name: String::from("Perth Hills"),
            },
            DistrictEntry {
                id: 20,
                region_id: 2,
                name: String::from("Blackwood"),
            },
        ],
        tenures: vec![
            ReferenceEntry::new(1, "DBCA Managed Land"),
            ReferenceEntry::new(2, "Private Property"),
            ReferenceEntry::new(3, "Other Crown"),
            ReferenceEntry::new(4, "Other"),
            ReferenceEntry::new(5, "Plantation"),
            ReferenceEntry::new(6, "Private Plantation"),
        ],
        causes: vec![
            ReferenceEntry::new(1, "Lightning"),
            ReferenceEntry::new(2, "Escape DPaW burning"),
            ReferenceEntry::new(3, "Other"),
        ],
        agencies: vec![
            ReferenceEntry::new(1, "DBCA"),
            ReferenceEntry::new(2, "DFES"),
            ReferenceEntry::new(3, "Other"),
        ],
        injury_types: vec![
            ReferenceEntry::new(1, "Fatality"),
            ReferenceEntry::new(2, "Injury"),
        ],
        damage_types: vec![
            ReferenceEntry::new(1, "Dwelling"),
            ReferenceEntry::new(2, "Fencing"),
        ],
        officers: vec![ReferenceEntry::new(1, "other"), ReferenceEntry::new(2, "jsmith")],
    }
}

pub fn create_test_reference() -> ReferenceData {
    ReferenceData::new(create_test_tables()).unwrap()
}
