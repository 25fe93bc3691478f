use serde::{Deserialize, Serialize};

/// A flat delivery point record, with reference keys already resolved
/// into text. Any field may be absent or blank; blank fields are
/// ignored when formatting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub organisation_name: Option<String>,
    pub department_name: Option<String>,
    pub sub_building_name: Option<String>,
    pub building_name: Option<String>,
    pub building_number: Option<String>,
    /// Whether the building number and the sub-building name should
    /// appear concatenated on the same line.
    pub concatenate_building_number: bool,
    pub dependent_thoroughfare_name: Option<String>,
    pub dependent_thoroughfare_descriptor: Option<String>,
    pub thoroughfare_name: Option<String>,
    pub thoroughfare_descriptor: Option<String>,
    pub double_dependent_locality: Option<String>,
    pub dependent_locality: Option<String>,
    pub post_town: Option<String>,
    pub postcode: Option<String>,
    pub po_box_number: Option<String>,
}
