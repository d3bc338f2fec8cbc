//! The structured result of extracting qualification fields from a transcript.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{FieldConfidence, ProspectField};

/// One extracted field: the value (if any) and how confident we are in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedValue {
    /// Extracted value, drawn from the field's domain; None when unknown.
    pub value: Option<String>,
    /// Confidence category for the value.
    pub confidence: FieldConfidence,
}

impl ExtractedValue {
    /// An unknown value.
    pub fn unknown() -> Self {
        Self {
            value: None,
            confidence: FieldConfidence::Unknown,
        }
    }

    /// A known value with the given confidence.
    pub fn known(value: impl Into<String>, confidence: FieldConfidence) -> Self {
        Self {
            value: Some(value.into()),
            confidence,
        }
    }
}

/// Mapping from every qualification field to its extracted value.
///
/// Always re-derived from the full transcript, so later clarifications
/// overwrite earlier vague guesses; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldExtraction {
    fields: BTreeMap<ProspectField, ExtractedValue>,
}

impl FieldExtraction {
    /// Creates an extraction with every field unknown.
    pub fn empty() -> Self {
        let fields = ProspectField::ALL
            .iter()
            .map(|f| (*f, ExtractedValue::unknown()))
            .collect();
        Self { fields }
    }

    /// Sets a field to a known value.
    ///
    /// The value must be drawn from the field's domain; out-of-domain values
    /// are rejected so downstream scoring never sees free-form text.
    pub fn set(
        &mut self,
        field: ProspectField,
        value: impl Into<String>,
        confidence: FieldConfidence,
    ) -> bool {
        let value = value.into();
        if !field.accepts(&value) {
            return false;
        }
        self.fields.insert(field, ExtractedValue::known(value, confidence));
        true
    }

    /// Returns the extracted entry for a field.
    pub fn get(&self, field: ProspectField) -> &ExtractedValue {
        // Every field is seeded in `empty`, so the lookup cannot miss.
        &self.fields[&field]
    }

    /// Returns the value for a field, if known.
    pub fn value_of(&self, field: ProspectField) -> Option<&str> {
        self.get(field).value.as_deref()
    }

    /// Returns the confidence category for a field.
    pub fn confidence_of(&self, field: ProspectField) -> FieldConfidence {
        self.get(field).confidence
    }

    /// True when the field has a value with Clear or Vague confidence.
    pub fn is_known(&self, field: ProspectField) -> bool {
        self.get(field).confidence.is_known() && self.get(field).value.is_some()
    }

    /// Fields still unknown after extraction.
    pub fn unknown_fields(&self) -> Vec<ProspectField> {
        ProspectField::ALL
            .iter()
            .copied()
            .filter(|f| !self.is_known(*f))
            .collect()
    }

    /// Fills unknown fields from a fallback extraction, leaving known
    /// fields untouched. Rule-layer results always win.
    pub fn merge_fallback(&mut self, fallback: &FieldExtraction) {
        for field in ProspectField::ALL {
            if !self.is_known(*field) && fallback.is_known(*field) {
                self.fields.insert(*field, fallback.get(*field).clone());
            }
        }
    }

    /// Iterates over all fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ProspectField, &ExtractedValue)> {
        self.fields.iter().map(|(f, v)| (*f, v))
    }
}

impl Default for FieldExtraction {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extraction_has_every_field_unknown() {
        let extraction = FieldExtraction::empty();
        for field in ProspectField::ALL {
            assert_eq!(extraction.confidence_of(*field), FieldConfidence::Unknown);
            assert!(extraction.value_of(*field).is_none());
        }
        assert_eq!(extraction.unknown_fields().len(), ProspectField::ALL.len());
    }

    #[test]
    fn set_accepts_in_domain_values() {
        let mut extraction = FieldExtraction::empty();
        assert!(extraction.set(
            ProspectField::Industry,
            "construction",
            FieldConfidence::Clear
        ));
        assert_eq!(extraction.value_of(ProspectField::Industry), Some("construction"));
        assert!(extraction.is_known(ProspectField::Industry));
    }

    #[test]
    fn set_rejects_out_of_domain_values() {
        let mut extraction = FieldExtraction::empty();
        assert!(!extraction.set(
            ProspectField::Industry,
            "underwater basket weaving",
            FieldConfidence::Clear
        ));
        assert!(!extraction.is_known(ProspectField::Industry));
    }

    #[test]
    fn set_accepts_numeric_values_for_numeric_fields() {
        let mut extraction = FieldExtraction::empty();
        assert!(extraction.set(ProspectField::TeamSize, "200", FieldConfidence::Clear));
        assert!(!extraction.set(ProspectField::TeamSize, "many", FieldConfidence::Clear));
    }

    #[test]
    fn merge_fallback_fills_only_unknown_fields() {
        let mut primary = FieldExtraction::empty();
        primary.set(ProspectField::Industry, "finance", FieldConfidence::Clear);

        let mut fallback = FieldExtraction::empty();
        fallback.set(ProspectField::Industry, "retail", FieldConfidence::Vague);
        fallback.set(ProspectField::BudgetStatus, "approved", FieldConfidence::Clear);

        primary.merge_fallback(&fallback);

        // Rule-layer value survives; the gap gets filled.
        assert_eq!(primary.value_of(ProspectField::Industry), Some("finance"));
        assert_eq!(primary.value_of(ProspectField::BudgetStatus), Some("approved"));
    }

    #[test]
    fn extraction_serializes_with_field_names_as_keys() {
        let mut extraction = FieldExtraction::empty();
        extraction.set(ProspectField::BudgetStatus, "approved", FieldConfidence::Clear);

        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(
            json["fields"]["budget_status"]["value"],
            serde_json::json!("approved")
        );
        assert_eq!(
            json["fields"]["budget_status"]["confidence"],
            serde_json::json!("clear")
        );
    }
}
