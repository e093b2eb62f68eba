// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field dependency rules and their resolution.
//!
//! A rule says "when this condition holds, do this to those fields". Rules
//! whose condition reads a field create a trigger → affected edge; the table
//! orders every field so triggers are resolved before the fields they govern
//! and refuses to build if the edges form a cycle.

use crate::error::CoreError;
use bfrs_domain::{
    DISPATCH_PW_NO, Field, FieldSet, FieldValue, Incident, ReferenceData,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Resolved values keyed by field.
pub type Patch = BTreeMap<Field, FieldValue>;

/// A condition over the values visible to a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Always holds.
    Always,
    /// The field's current value is truthy.
    IsTrue(Field),
    /// The field's current value is falsy.
    IsFalsy(Field),
    /// The field's current value is the given integer.
    Equals(Field, i64),
    /// The field's current value is anything but the given integer.
    NotEquals(Field, i64),
    /// The field is editable in the current stage.
    Editable(Field),
    /// The persisted instance value of the field is truthy.
    InstanceHas(Field),
    /// The persisted instance carries a final fire boundary.
    FinalBoundary,
    /// The session may maintain authoritative data.
    MaintainsData,
    /// The instance has been persisted before.
    Persisted,
    Not(Box<Self>),
    All(Vec<Self>),
    Any(Vec<Self>),
}

impl Condition {
    /// Negates a condition.
    #[must_use]
    pub fn negate(condition: Self) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Collects the fields whose current value this condition reads.
    pub fn triggers(&self, into: &mut BTreeSet<Field>) {
        match self {
            Self::IsTrue(f) | Self::IsFalsy(f) | Self::Equals(f, _) | Self::NotEquals(f, _) => {
                into.insert(*f);
            }
            Self::Not(inner) => inner.triggers(into),
            Self::All(items) | Self::Any(items) => {
                for item in items {
                    item.triggers(into);
                }
            }
            Self::Always
            | Self::Editable(_)
            | Self::InstanceHas(_)
            | Self::FinalBoundary
            | Self::MaintainsData
            | Self::Persisted => {}
        }
    }

    /// Evaluates the condition against `view`.
    #[must_use]
    pub fn holds(&self, view: &FieldView<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::IsTrue(f) => view.current(*f).is_truthy(),
            Self::IsFalsy(f) => !view.current(*f).is_truthy(),
            Self::Equals(f, v) => view.current(*f).as_int() == Some(*v),
            Self::NotEquals(f, v) => view.current(*f).as_int() != Some(*v),
            Self::Editable(f) => view.is_editable(*f),
            Self::InstanceHas(f) => view.instance.value(*f).is_truthy(),
            Self::FinalBoundary => view.instance.final_fire_boundary,
            Self::MaintainsData => view.can_maintain_data,
            Self::Persisted => view.instance.is_persisted(),
            Self::Not(inner) => !inner.holds(view),
            Self::All(items) => items.iter().all(|c| c.holds(view)),
            Self::Any(items) => items.iter().any(|c| c.holds(view)),
        }
    }
}

/// What a matching rule does to the fields it affects.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleAction {
    /// Clear the field.
    ForceNull,
    /// Set the field to a fixed value.
    ForceDefault(FieldValue),
    /// Keep the persisted instance value, ignoring the submission.
    LockToInstance,
    /// The field must end up non-null.
    RequireNonNull,
}

/// A single dependency rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Short name used in logs.
    pub name: &'static str,
    pub when: Condition,
    pub affects: Vec<Field>,
    pub action: RuleAction,
    /// The rule also applies where the stage does not let the user edit
    /// the affected fields.
    pub overrides_editability: bool,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(name: &'static str, when: Condition, affects: &[Field], action: RuleAction) -> Self {
        Self {
            name,
            when,
            affects: affects.to_vec(),
            action,
            overrides_editability: false,
        }
    }

    /// Makes the rule apply to its fields even where they are not editable.
    #[must_use]
    pub const fn regardless_of_editability(mut self) -> Self {
        self.overrides_editability = true;
        self
    }
}

/// The values visible while resolving a save.
///
/// Resolved values win over submitted values, which win over the persisted
/// instance. A field that is not editable, or that was not submitted, reads
/// as its instance value.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub instance: &'a Incident,
    pub input: &'a Patch,
    pub editable: &'a FieldSet,
    pub resolved: &'a Patch,
    pub can_maintain_data: bool,
}

impl FieldView<'_> {
    /// Returns the current value of `field`.
    #[must_use]
    pub fn current(&self, field: Field) -> FieldValue {
        if let Some(value) = self.resolved.get(&field) {
            return value.clone();
        }
        if let Some(value) = self.input.get(&field).filter(|_| self.is_editable(field)) {
            return value.clone();
        }
        self.instance.value(field)
    }

    #[must_use]
    pub fn is_editable(&self, field: Field) -> bool {
        self.editable.contains(&field)
    }
}

/// The outcome of resolving one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The field must be non-null.
    pub required: bool,
    /// The resolved value.
    pub value: FieldValue,
    /// The value was locked to the persisted instance.
    pub locked: bool,
}

/// An ordered, acyclic set of dependency rules.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyTable {
    rules: Vec<Rule>,
    order: Vec<Field>,
    by_field: BTreeMap<Field, Vec<usize>>,
}

impl DependencyTable {
    /// Builds a table, ordering fields so triggers precede affected fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DependencyCycle` if the trigger → affected edges
    /// form a cycle.
    pub fn new(rules: Vec<Rule>) -> Result<Self, CoreError> {
        let mut edges: BTreeMap<Field, BTreeSet<Field>> = BTreeMap::new();
        let mut by_field: BTreeMap<Field, Vec<usize>> = BTreeMap::new();

        for (index, rule) in rules.iter().enumerate() {
            let mut triggers: BTreeSet<Field> = BTreeSet::new();
            rule.when.triggers(&mut triggers);
            for affected in &rule.affects {
                by_field.entry(*affected).or_default().push(index);
                for trigger in &triggers {
                    edges.entry(*trigger).or_default().insert(*affected);
                }
            }
        }

        let order: Vec<Field> = topological_order(&edges)?;
        debug!(rules = rules.len(), "Built dependency table");

        Ok(Self {
            rules,
            order,
            by_field,
        })
    }

    /// Builds the standard incident rule table.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DependencyCycle` if the rules are cyclic.
    pub fn standard(reference: &ReferenceData) -> Result<Self, CoreError> {
        Self::new(standard_rules(reference))
    }

    /// Every field, triggers first.
    #[must_use]
    pub fn order(&self) -> &[Field] {
        &self.order
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Resolves one field against `view`.
    ///
    /// Fields that are not editable resolve to the instance value, and only
    /// rules marked `overrides_editability` may change them. Otherwise every
    /// matching rule is applied in table order, so later rules override
    /// earlier ones.
    #[must_use]
    pub fn resolve(&self, field: Field, view: &FieldView<'_>) -> Resolution {
        let editable: bool = view.is_editable(field);
        let mut resolution: Resolution = Resolution {
            required: false,
            value: view.current(field),
            locked: false,
        };

        let Some(indexes) = self.by_field.get(&field) else {
            return resolution;
        };

        for index in indexes {
            let Some(rule) = self.rules.get(*index) else {
                continue;
            };
            if !editable && !rule.overrides_editability {
                continue;
            }
            if !rule.when.holds(view) {
                continue;
            }
            debug!(rule = rule.name, field = field.as_str(), "Applying rule");
            match &rule.action {
                RuleAction::ForceNull => {
                    resolution.value = FieldValue::Null;
                    resolution.required = false;
                    resolution.locked = false;
                }
                RuleAction::ForceDefault(value) => {
                    resolution.value = value.clone();
                    resolution.required = false;
                    resolution.locked = false;
                }
                RuleAction::LockToInstance => {
                    resolution.value = view.instance.value(field);
                    resolution.required = false;
                    resolution.locked = true;
                }
                RuleAction::RequireNonNull => {
                    resolution.required = true;
                }
            }
        }

        resolution
    }
}

/// Orders every field so each edge's source precedes its target.
///
/// Ties are broken by catalogue order, which keeps the result stable.
fn topological_order(edges: &BTreeMap<Field, BTreeSet<Field>>) -> Result<Vec<Field>, CoreError> {
    let mut in_degree: BTreeMap<Field, usize> = Field::ALL.iter().map(|f| (*f, 0)).collect();
    for targets in edges.values() {
        for target in targets {
            *in_degree.entry(*target).or_default() += 1;
        }
    }

    let mut ready: BTreeSet<Field> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(field, _)| *field)
        .collect();
    let mut order: Vec<Field> = Vec::with_capacity(in_degree.len());

    while let Some(field) = ready.pop_first() {
        order.push(field);
        if let Some(targets) = edges.get(&field) {
            for target in targets {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(*target);
                    }
                }
            }
        }
    }

    if order.len() < in_degree.len() {
        let fields: Vec<Field> = in_degree
            .into_iter()
            .filter(|(_, degree)| *degree > 0)
            .map(|(field, _)| field)
            .collect();
        return Err(CoreError::DependencyCycle { fields });
    }

    Ok(order)
}

/// Fields cleared when the fire was not found.
const NOT_FOUND_CLEARED: &[Field] = &[
    Field::MaxFireLevel,
    Field::ArsonSquadNotified,
    Field::FireContainedDate,
    Field::FireControlledDate,
    Field::FireSafeDate,
    Field::FirstAttack,
    Field::OtherFirstAttack,
    Field::FinalControl,
    Field::OtherFinalControl,
    Field::InitialControl,
    Field::OtherInitialControl,
    Field::Area,
    Field::OffenceNo,
];

/// The fire-not-found short circuit. Only a stage that edits the switch can
/// trigger it.
#[must_use]
pub fn fire_not_found() -> Condition {
    Condition::All(vec![
        Condition::Editable(Field::FireNotFound),
        Condition::IsTrue(Field::FireNotFound),
    ])
}

/// Wraps a rule so it is skipped when the fire was not found.
fn unless_not_found(mut rule: Rule) -> Rule {
    rule.when = Condition::All(vec![Condition::negate(fire_not_found()), rule.when]);
    rule
}

/// Rules for an "other" escape value: the detail fields are required when
/// `trigger` is `other_id` and cleared otherwise.
fn escape_rules(name: &'static str, trigger: Field, other_id: i64, details: &[Field]) -> [Rule; 2] {
    [
        Rule::new(
            name,
            Condition::NotEquals(trigger, other_id),
            details,
            RuleAction::ForceNull,
        ),
        Rule::new(
            name,
            Condition::Equals(trigger, other_id),
            details,
            RuleAction::RequireNonNull,
        ),
    ]
}

/// The incident rule table, in application order.
#[must_use]
pub fn standard_rules(reference: &ReferenceData) -> Vec<Rule> {
    let mut rules: Vec<Rule> = Vec::new();

    // Switches that hold regardless of the fire being found.
    rules.push(Rule::new(
        "initial_area_unknown",
        Condition::IsTrue(Field::InitialAreaUnknown),
        &[Field::InitialArea],
        RuleAction::ForceNull,
    ));
    rules.push(Rule::new(
        "dispatch_pw",
        Condition::Any(vec![
            Condition::IsFalsy(Field::DispatchPw),
            Condition::Equals(Field::DispatchPw, DISPATCH_PW_NO),
        ]),
        &[Field::DispatchPwDate],
        RuleAction::ForceNull,
    ));
    rules.push(Rule::new(
        "dispatch_aerial",
        Condition::IsFalsy(Field::DispatchAerial),
        &[Field::DispatchAerialDate],
        RuleAction::ForceNull,
    ));
    rules.push(Rule::new(
        "fire_position_override",
        Condition::IsFalsy(Field::FirePositionOverride),
        &[Field::FirePosition],
        RuleAction::LockToInstance,
    ));
    rules.push(Rule::new(
        "dfes_incident_no",
        Condition::All(vec![
            Condition::InstanceHas(Field::DfesIncidentNo),
            Condition::negate(Condition::MaintainsData),
        ]),
        &[Field::DfesIncidentNo],
        RuleAction::LockToInstance,
    ));
    rules.push(Rule::new(
        "tenure_from_import",
        Condition::Persisted,
        &[Field::Tenure],
        RuleAction::LockToInstance,
    ));
    rules.extend(escape_rules(
        "other_tenure",
        Field::Tenure,
        reference.tenure_other(),
        &[Field::OtherTenure],
    ));
    rules.extend(escape_rules(
        "other_field_officer",
        Field::FieldOfficer,
        reference.officer_other(),
        &[
            Field::OtherFieldOfficer,
            Field::OtherFieldOfficerAgency,
            Field::OtherFieldOfficerPhone,
        ],
    ));

    // Fire not found.
    rules.push(Rule::new(
        "fire_not_found",
        fire_not_found(),
        NOT_FOUND_CLEARED,
        RuleAction::ForceNull,
    ));
    rules.push(
        Rule::new(
            "fire_not_found",
            fire_not_found(),
            &[Field::ReportingYear],
            RuleAction::ForceNull,
        )
        .regardless_of_editability(),
    );
    rules.push(Rule::new(
        "fire_not_found",
        fire_not_found(),
        &[Field::AreaLimit],
        RuleAction::ForceDefault(FieldValue::Bool(false)),
    ));
    rules.push(Rule::new(
        "fire_not_found",
        fire_not_found(),
        &[Field::Region, Field::District],
        RuleAction::LockToInstance,
    ));

    let mut found: Vec<Rule> = Vec::new();

    found.push(Rule::new(
        "fire_monitored_only",
        Condition::IsTrue(Field::FireMonitoredOnly),
        &[Field::FirstAttack, Field::OtherFirstAttack],
        RuleAction::ForceNull,
    ));
    found.push(Rule::new(
        "fire_monitored_only",
        Condition::IsFalsy(Field::FireMonitoredOnly),
        &[Field::InvalidDetails],
        RuleAction::ForceNull,
    ));

    found.extend(escape_rules(
        "other_cause",
        Field::Cause,
        reference.cause_other(),
        &[Field::OtherCause],
    ));
    found.extend(escape_rules(
        "prescribed_burn_id",
        Field::Cause,
        reference.cause_escape_dpaw_burning(),
        &[Field::PrescribedBurnId],
    ));
    found.extend(escape_rules(
        "other_first_attack",
        Field::FirstAttack,
        reference.agency_other(),
        &[Field::OtherFirstAttack],
    ));
    found.extend(escape_rules(
        "other_initial_control",
        Field::InitialControl,
        reference.agency_other(),
        &[Field::OtherInitialControl],
    ));
    found.extend(escape_rules(
        "other_final_control",
        Field::FinalControl,
        reference.agency_other(),
        &[Field::OtherFinalControl],
    ));

    found.push(Rule::new(
        "final_fire_boundary",
        Condition::FinalBoundary,
        &[Field::Area],
        RuleAction::LockToInstance,
    ));
    found.push(Rule::new(
        "final_fire_boundary",
        Condition::FinalBoundary,
        &[Field::AreaLimit],
        RuleAction::ForceDefault(FieldValue::Bool(false)),
    ));
    found.push(Rule::new(
        "area_limit",
        Condition::All(vec![
            Condition::negate(Condition::FinalBoundary),
            Condition::IsTrue(Field::AreaLimit),
        ]),
        &[Field::Area],
        RuleAction::RequireNonNull,
    ));
    found.push(Rule::new(
        "area_limit",
        Condition::All(vec![
            Condition::negate(Condition::FinalBoundary),
            Condition::IsFalsy(Field::AreaLimit),
        ]),
        &[Field::Area],
        RuleAction::ForceNull,
    ));

    found.push(Rule::new(
        "arson_squad_notified",
        Condition::IsFalsy(Field::ArsonSquadNotified),
        &[Field::OffenceNo],
        RuleAction::ForceNull,
    ));

    rules.extend(found.into_iter().map(unless_not_found));
    rules
}
