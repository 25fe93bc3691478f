use serde::Serialize;

/// The kind of records a mainfile extract holds, read from the
/// identifier in its header record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileKind {
    Localities,
    Thoroughfares,
    ThoroughfareDescriptors,
    BuildingNames,
    SubBuildingNames,
    Organisations,
    Addresses,
}

pub fn detect_kind(header: &str) -> Option<FileKind> {
    // the header starts with padding and a zero record identifier
    let tag = header
        .trim_start_matches(|c| c == '\0' || c == ' ')
        .trim_start_matches('0');

    Some(match tag.get(..8)? {
        "LOCALITY" => FileKind::Localities,
        "THOROUGH" => FileKind::Thoroughfares,
        "THDESCRI" => FileKind::ThoroughfareDescriptors,
        "BUILDING" => FileKind::BuildingNames,
        "SUBBUILD" => FileKind::SubBuildingNames,
        "ORGANISA" => FileKind::Organisations,
        "ADDRESS " => FileKind::Addresses,
        _ => return None,
    })
}

/// A delivery point row. Reference fields hold foreign keys into the
/// other record kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AddressRow {
    pub key: u32,
    pub postcode: Option<String>,
    pub locality_key: Option<u32>,
    pub thoroughfare_key: Option<u32>,
    pub thoroughfare_descriptor_key: Option<u32>,
    pub dependent_thoroughfare_key: Option<u32>,
    pub dependent_thoroughfare_descriptor_key: Option<u32>,
    pub building_number: Option<u32>,
    pub building_name_key: Option<u32>,
    pub sub_building_name_key: Option<u32>,
    pub number_of_households: u32,
    pub organisation_key: Option<u32>,
    pub delivery_point_type: DeliveryPointType,
    pub concatenate_building_number: bool,
    pub delivery_point_suffix: Option<String>,
    pub small_user_organisation: bool,
    pub po_box_number: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum DeliveryPointType {
    SmallUser,
    LargeUser,
    #[default]
    Unknown,
}

impl DeliveryPointType {
    fn from_byte(value: Option<u8>) -> Self {
        match value {
            Some(b'S') => Self::SmallUser,
            Some(b'L') => Self::LargeUser,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LocalityRow {
    pub key: u32,
    pub post_town: Option<String>,
    pub dependent_locality: Option<String>,
    pub double_dependent_locality: Option<String>,
}

/// Thoroughfares, building names and sub-building names share this
/// key-and-text shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NameRow {
    pub key: u32,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrganisationRow {
    pub key: u32,
    pub delivery_point_type: DeliveryPointType,
    pub name: Option<String>,
    pub department: Option<String>,
}

pub fn extract_address(line: &str) -> AddressRow {
    AddressRow {
        key: key(line, 7, 15).unwrap_or(0),
        postcode: postcode(line),
        locality_key: key(line, 15, 21),
        thoroughfare_key: key(line, 21, 29),
        thoroughfare_descriptor_key: key(line, 29, 33),
        dependent_thoroughfare_key: key(line, 33, 41),
        dependent_thoroughfare_descriptor_key: key(line, 41, 45),
        building_number: key(line, 45, 49),
        building_name_key: key(line, 49, 57),
        sub_building_name_key: key(line, 57, 65),
        number_of_households: key(line, 65, 69).unwrap_or(0),
        organisation_key: key(line, 69, 77),
        delivery_point_type: DeliveryPointType::from_byte(byte(line, 77)),
        concatenate_building_number: flag(line, 78),
        delivery_point_suffix: field(line, 79, 81).map(str::to_string),
        small_user_organisation: flag(line, 81),
        po_box_number: field(line, 82, 88).map(str::to_string),
    }
}

pub fn extract_locality(line: &str) -> LocalityRow {
    LocalityRow {
        key: key(line, 0, 6).unwrap_or(0),
        post_town: field(line, 51, 81).map(str::to_string),
        dependent_locality: field(line, 81, 116).map(str::to_string),
        double_dependent_locality: field(line, 116, 151).map(str::to_string),
    }
}

pub fn extract_thoroughfare(line: &str) -> NameRow {
    NameRow {
        key: key(line, 0, 8).unwrap_or(0),
        name: field(line, 8, 68).map(str::to_string),
    }
}

pub fn extract_thoroughfare_descriptor(line: &str) -> NameRow {
    NameRow {
        key: key(line, 0, 4).unwrap_or(0),
        name: field(line, 4, 24).map(str::to_string),
    }
}

pub fn extract_building_name(line: &str) -> NameRow {
    NameRow {
        key: key(line, 0, 8).unwrap_or(0),
        name: field(line, 8, 58).map(str::to_string),
    }
}

pub fn extract_sub_building_name(line: &str) -> NameRow {
    NameRow {
        key: key(line, 0, 8).unwrap_or(0),
        name: field(line, 8, 38).map(str::to_string),
    }
}

pub fn extract_organisation(line: &str) -> OrganisationRow {
    OrganisationRow {
        key: key(line, 0, 8).unwrap_or(0),
        delivery_point_type: DeliveryPointType::from_byte(byte(line, 8)),
        name: field(line, 9, 69).map(str::to_string),
        department: field(line, 69, 129).map(str::to_string),
    }
}

/// The postcode is stored as a four character outward part and a three
/// character inward part; the gap between them disappears when the
/// outward code is short.
fn postcode(line: &str) -> Option<String> {
    let outward = field(line, 0, 4);
    let inward = field(line, 4, 7);
    if outward.is_none() && inward.is_none() {
        return None;
    }

    Some(format!(
        "{}{}",
        outward.unwrap_or(""),
        inward.unwrap_or("")
    ))
}

/// A fixed-width text field; space padding is trimmed and an all-space
/// field is absent. Short rows leave trailing fields absent.
fn field(line: &str, start: usize, end: usize) -> Option<&str> {
    let end = end.min(line.len());
    if start >= end {
        return None;
    }

    let raw = line.get(start..end)?.trim();
    (!raw.is_empty()).then_some(raw)
}

/// A numeric field; zero means absent, and anything unparseable
/// degrades to absent.
fn key(line: &str, start: usize, end: usize) -> Option<u32> {
    let value: u32 = field(line, start, end)?.parse().ok()?;
    (value != 0).then_some(value)
}

fn byte(line: &str, index: usize) -> Option<u8> {
    line.as_bytes().get(index).copied()
}

fn flag(line: &str, index: usize) -> bool {
    byte(line, index) == Some(b'Y')
}
