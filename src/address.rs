use crate::Address;

/// Formats a delivery point record into printable lines, most specific
/// entity first, postcode last. Blank fields emit nothing; premises
/// numbers are joined onto the line that follows them.
pub fn format_address(record: &Address) -> Vec<String> {
    let mut lines = Vec::with_capacity(9);
    push_trimmed(&mut lines, record.organisation_name.as_deref());
    push_trimmed(&mut lines, record.department_name.as_deref());

    // Everything below the premises group, in output order. A number
    // prefix attaches to the first of these lines.
    let mut tail = Vec::with_capacity(6);
    push_trimmed(
        &mut tail,
        thoroughfare_line(
            record.dependent_thoroughfare_name.as_deref(),
            record.dependent_thoroughfare_descriptor.as_deref(),
        )
        .as_deref(),
    );
    push_trimmed(
        &mut tail,
        thoroughfare_line(
            record.thoroughfare_name.as_deref(),
            record.thoroughfare_descriptor.as_deref(),
        )
        .as_deref(),
    );
    push_trimmed(&mut tail, record.double_dependent_locality.as_deref());
    push_trimmed(&mut tail, record.dependent_locality.as_deref());
    push_trimmed(&mut tail, record.post_town.as_deref());
    push_trimmed(&mut tail, record.postcode.as_deref());

    match trimmed(record.po_box_number.as_deref()) {
        Some(number) => lines.push(format!("PO Box {}", number.to_ascii_uppercase())),
        None => {
            let premises = resolve_premises(record);
            push_trimmed(&mut lines, premises.sub_building_name.as_deref());

            let sub_number = trimmed(premises.sub_building_number.as_deref());
            let number = trimmed(premises.building_number.as_deref());
            match trimmed(premises.building_name.as_deref()) {
                Some(name) => {
                    // the sub-building number shares the building name
                    // line; the building number moves down a line
                    lines.push(match &sub_number {
                        Some(sub) => format!("{sub} {name}"),
                        None => name,
                    });
                    if let Some(number) = &number {
                        prefix_first(&mut tail, number);
                    }
                }
                None => {
                    if let Some(number) = &number {
                        prefix_first(&mut tail, number);
                    }
                    if let Some(sub) = &sub_number {
                        prefix_first(&mut tail, sub);
                    }
                }
            }
        }
    }

    lines.append(&mut tail);
    lines
}

struct Premises {
    building_name: Option<String>,
    building_number: Option<String>,
    sub_building_name: Option<String>,
    sub_building_number: Option<String>,
}

fn resolve_premises(record: &Address) -> Premises {
    let mut premises = Premises {
        building_name: None,
        building_number: record.building_number.clone(),
        sub_building_name: None,
        sub_building_number: None,
    };
    reclassify(
        record.building_name.as_deref(),
        &mut premises.building_name,
        &mut premises.building_number,
    );
    reclassify(
        record.sub_building_name.as_deref(),
        &mut premises.sub_building_name,
        &mut premises.sub_building_number,
    );

    if record.concatenate_building_number {
        if let Some(sub) = &record.sub_building_name {
            let mut number = premises.building_number.take().unwrap_or_default();
            number.push_str(sub);
            premises.building_number = Some(number);
        }
        premises.sub_building_name = None;
        premises.sub_building_number = None;
    }

    if premises.building_name.is_some() {
        split_number_from_name(&mut premises);
    }

    premises
}

/// Names that are really numbers get moved to the number slot: numeric
/// ranges ("1TO1"), numeric-alpha forms ("12A") and single characters,
/// which keep a trailing comma on the printed line ("A," 12 High St).
fn reclassify(original: Option<&str>, name: &mut Option<String>, number: &mut Option<String>) {
    let Some(original) = original else { return };
    let original = original.trim();
    if original.is_empty() {
        return;
    }

    if has_numeric_range_suffix(original) || has_numeric_alpha_suffix(original) {
        *number = Some(original.to_string());
    } else if original.chars().count() == 1 {
        *number = Some(format!("{original},"));
    } else {
        *name = Some(original.to_string());
    }
}

fn split_number_from_name(premises: &mut Premises) {
    let Some(name) = premises.building_name.as_deref() else {
        return;
    };
    let Some(space) = name.rfind(' ') else { return };

    if !should_split(&name[space + 1..]) {
        return;
    }

    let prefix = name[..space].trim();
    if belongs_with_number(prefix) {
        return;
    }

    premises.building_number = Some(name[space + 1..].to_string());
    premises.building_name = Some(prefix.to_string());
}

fn should_split(suffix: &str) -> bool {
    if is_numeric(suffix) {
        // 1-9999 would have been supplied as a building number if it
        // were one, so a short numeric tail stays part of the name
        return suffix.len() > 4;
    }

    has_numeric_range_suffix(suffix) || has_numeric_alpha_suffix(suffix)
}

/// Royal Mail's keyword list of building names that keep their number
/// suffix on the same line.
fn belongs_with_number(name: &str) -> bool {
    const KEYWORDS: &[&str] = &[
        "BACK OF",
        "BLOCK",
        "BLOCKS",
        "BUILDING",
        "MAISONETTE",
        "MAISONETTES",
        "REAR OF",
        "SHOP",
        "SHOPS",
        "STALL",
        "STALLS",
        "SUITE",
        "SUITES",
        "UNIT",
        "UNITS",
    ];

    KEYWORDS
        .binary_search(&name.to_ascii_uppercase().as_str())
        .is_ok()
}

fn has_numeric_range_suffix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.first().is_some_and(|b| b.is_ascii_digit()) && bytes.last().is_some_and(|b| b.is_ascii_digit())
}

fn has_numeric_alpha_suffix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_digit() && bytes[bytes.len() - 2].is_ascii_digit()
}

fn is_numeric(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

fn thoroughfare_line(name: Option<&str>, descriptor: Option<&str>) -> Option<String> {
    let name = name?.trim();
    if name.is_empty() {
        return None;
    }

    match descriptor.map(str::trim).filter(|d| !d.is_empty()) {
        Some(descriptor) => Some(format!("{name} {descriptor}")),
        None => Some(name.to_string()),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn push_trimmed(lines: &mut Vec<String>, value: Option<&str>) {
    if let Some(line) = trimmed(value) {
        lines.push(line);
    }
}

fn prefix_first(lines: &mut [String], value: &str) {
    if let Some(first) = lines.first_mut() {
        *first = format!("{value} {first}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn organisation_first_postcode_last() {
        let record = Address {
            organisation_name: s("LEDA ENGINEERING LTD"),
            dependent_locality: s("APPLEFORD"),
            post_town: s("ABINGDON"),
            postcode: s("OX14 4PG"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["LEDA ENGINEERING LTD", "APPLEFORD", "ABINGDON", "OX14 4PG"]
        );
    }

    #[test]
    fn department_after_organisation() {
        let record = Address {
            organisation_name: s("SOUTH LANARKSHIRE COUNCIL"),
            department_name: s("HEAD START"),
            post_town: s("GLASGOW"),
            postcode: s("G72 0UP"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["SOUTH LANARKSHIRE COUNCIL", "HEAD START", "GLASGOW", "G72 0UP"]
        );
    }

    #[test]
    fn thoroughfare_joins_descriptor() {
        let record = Address {
            thoroughfare_name: s("ACACIA"),
            thoroughfare_descriptor: s("AVENUE"),
            post_town: s("ABINGDON"),
            postcode: s("OX14 4PG"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["ACACIA AVENUE", "ABINGDON", "OX14 4PG"]
        );
    }

    #[test]
    fn dependent_thoroughfare_joins_descriptor() {
        let record = Address {
            dependent_thoroughfare_name: s("ACACIA"),
            dependent_thoroughfare_descriptor: s("AVENUE"),
            post_town: s("ABINGDON"),
            postcode: s("OX14 4PG"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["ACACIA AVENUE", "ABINGDON", "OX14 4PG"]
        );
    }

    #[test]
    fn descriptor_without_name_is_dropped() {
        let record = Address {
            thoroughfare_descriptor: s("AVENUE"),
            post_town: s("ABINGDON"),
            ..Address::default()
        };

        assert_eq!(format_address(&record), ["ABINGDON"]);
    }

    #[test]
    fn building_number_joins_thoroughfare() {
        let record = Address {
            building_number: s("1"),
            thoroughfare_name: s("ACACIA AVENUE"),
            post_town: s("ABINGDON"),
            postcode: s("OX14 4PG"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["1 ACACIA AVENUE", "ABINGDON", "OX14 4PG"]
        );
    }

    #[test]
    fn building_name_gets_its_own_line() {
        let record = Address {
            building_name: s("THE MANOR"),
            thoroughfare_name: s("UPPER HILL"),
            post_town: s("HORLEY"),
            postcode: s("RH6 0HP"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["THE MANOR", "UPPER HILL", "HORLEY", "RH6 0HP"]
        );
    }

    #[test]
    fn building_name_above_numbered_thoroughfare() {
        let record = Address {
            building_name: s("VICTORIA HOUSE"),
            building_number: s("15"),
            thoroughfare_name: s("THE STREET"),
            post_town: s("CHRISTCHURCH"),
            postcode: s("BH23 6AA"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["VICTORIA HOUSE", "15 THE STREET", "CHRISTCHURCH", "BH23 6AA"]
        );
    }

    #[test]
    fn sub_building_name_above_numbered_thoroughfare() {
        let record = Address {
            sub_building_name: s("FLAT 1"),
            building_number: s("12"),
            thoroughfare_name: s("LIME TREE AVENUE"),
            post_town: s("BRISTOL"),
            postcode: s("BS8 4AB"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["FLAT 1", "12 LIME TREE AVENUE", "BRISTOL", "BS8 4AB"]
        );
    }

    #[test]
    fn sub_building_name_above_building_name() {
        let record = Address {
            sub_building_name: s("STABLES FLAT"),
            building_name: s("THE MANOR"),
            thoroughfare_name: s("UPPER HILL"),
            post_town: s("HORLEY"),
            postcode: s("RH6 0HP"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["STABLES FLAT", "THE MANOR", "UPPER HILL", "HORLEY", "RH6 0HP"]
        );
    }

    #[test]
    fn full_premises_stack() {
        let record = Address {
            sub_building_name: s("BASEMENT FLAT"),
            building_name: s("VICTORIA HOUSE"),
            building_number: s("15"),
            thoroughfare_name: s("THE STREET"),
            post_town: s("CORYTON"),
            postcode: s("BP23 6AA"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "BASEMENT FLAT",
                "VICTORIA HOUSE",
                "15 THE STREET",
                "CORYTON",
                "BP23 6AA"
            ]
        );
    }

    #[test]
    fn concatenated_sub_building_name() {
        let record = Address {
            sub_building_name: s("A"),
            building_number: s("12"),
            thoroughfare_name: s("SMITH STREET"),
            post_town: s("CORYTON"),
            postcode: s("BP23 6AA"),
            concatenate_building_number: true,
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["12A SMITH STREET", "CORYTON", "BP23 6AA"]
        );
    }

    #[test]
    fn single_character_sub_building_keeps_comma() {
        let record = Address {
            sub_building_name: s("A"),
            building_number: s("12"),
            thoroughfare_name: s("SMITH STREET"),
            post_town: s("CORYTON"),
            postcode: s("BP23 6AA"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["A, 12 SMITH STREET", "CORYTON", "BP23 6AA"]
        );
    }

    #[test]
    fn numeric_alpha_building_name_becomes_number() {
        let record = Address {
            building_name: s("1A"),
            dependent_thoroughfare_name: s("SEASTONE COURT"),
            thoroughfare_name: s("STATION ROAD"),
            post_town: s("HOLT"),
            postcode: s("NR25 7HG"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["1A SEASTONE COURT", "STATION ROAD", "HOLT", "NR25 7HG"]
        );
    }

    #[test]
    fn numeric_alpha_suffix_is_split_from_building_name() {
        let record = Address {
            organisation_name: s("S D ALCOTT FLORISTS"),
            building_name: s("FLOWER HOUSE 189A"),
            thoroughfare_name: s("PYE GREEN ROAD"),
            post_town: s("CANNOCK"),
            postcode: s("WS11 5SB"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "S D ALCOTT FLORISTS",
                "FLOWER HOUSE",
                "189A PYE GREEN ROAD",
                "CANNOCK",
                "WS11 5SB"
            ]
        );
    }

    #[test]
    fn short_numeric_suffix_stays_in_building_name() {
        let record = Address {
            organisation_name: s("JAMES VILLA HOLIDAYS"),
            building_name: s("CENTRE 30"),
            thoroughfare_name: s("ST. LAURENCE AVENUE"),
            post_town: s("GRAFTON"),
            postcode: s("ME16 0LP"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "JAMES VILLA HOLIDAYS",
                "CENTRE 30",
                "ST. LAURENCE AVENUE",
                "GRAFTON",
                "ME16 0LP"
            ]
        );
    }

    #[test]
    fn long_numeric_suffix_is_split() {
        let record = Address {
            building_name: s("CENTRE 30000"),
            thoroughfare_name: s("HIGH STREET"),
            post_town: s("GRAFTON"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["CENTRE", "30000 HIGH STREET", "GRAFTON"]
        );
    }

    #[test]
    fn keyword_prefix_suppresses_the_split() {
        let record = Address {
            organisation_name: s("THE TAMBOURINE WAREHOUSE"),
            building_name: s("UNIT 1-3"),
            dependent_thoroughfare_name: s("INDUSTRIAL ESTATE"),
            thoroughfare_name: s("TAME ROAD"),
            post_town: s("LONDON"),
            postcode: s("E6 7HS"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "THE TAMBOURINE WAREHOUSE",
                "UNIT 1-3",
                "INDUSTRIAL ESTATE",
                "TAME ROAD",
                "LONDON",
                "E6 7HS"
            ]
        );
    }

    #[test]
    fn keyword_check_ignores_case() {
        let record = Address {
            building_name: s("Rear Of 5-7"),
            thoroughfare_name: s("HIGH STREET"),
            post_town: s("LONDON"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["Rear Of 5-7", "HIGH STREET", "LONDON"]
        );
    }

    #[test]
    fn numeric_sub_building_joins_building_name_line() {
        let record = Address {
            sub_building_name: s("10B"),
            building_name: s("BARRY JACKSON TOWER"),
            thoroughfare_name: s("ESTONE WALK"),
            post_town: s("BIRMINGHAM"),
            postcode: s("B6 5BA"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "10B BARRY JACKSON TOWER",
                "ESTONE WALK",
                "BIRMINGHAM",
                "B6 5BA"
            ]
        );
    }

    #[test]
    fn range_building_name_joins_thoroughfare() {
        let record = Address {
            sub_building_name: s("CARETAKERS FLAT"),
            building_name: s("110-114"),
            thoroughfare_name: s("HIGH STREET WEST"),
            post_town: s("BRISTOL"),
            postcode: s("BS1 2AW"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "CARETAKERS FLAT",
                "110-114 HIGH STREET WEST",
                "BRISTOL",
                "BS1 2AW"
            ]
        );
    }

    #[test]
    fn numeric_sub_building_with_name_and_number() {
        let record = Address {
            sub_building_name: s("2B"),
            building_name: s("THE TOWER"),
            building_number: s("27"),
            thoroughfare_name: s("JOHN STREET"),
            post_town: s("WINCHESTER"),
            postcode: s("SO23 9AP"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            [
                "2B THE TOWER",
                "27 JOHN STREET",
                "WINCHESTER",
                "SO23 9AP"
            ]
        );
    }

    #[test]
    fn po_box_line() {
        let record = Address {
            po_box_number: s("22"),
            post_town: s("FAREHAM"),
            postcode: s("PO14 3XH"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["PO Box 22", "FAREHAM", "PO14 3XH"]
        );
    }

    #[test]
    fn po_box_after_organisation_and_suppressing_premises() {
        let record = Address {
            organisation_name: s("ROBINSONS"),
            po_box_number: s("61"),
            sub_building_name: s("FLAT 1"),
            building_name: s("VICTORIA HOUSE"),
            building_number: s("15"),
            post_town: s("FAREHAM"),
            postcode: s("PO14 1UX"),
            ..Address::default()
        };

        assert_eq!(
            format_address(&record),
            ["ROBINSONS", "PO Box 61", "FAREHAM", "PO14 1UX"]
        );
    }

    #[test]
    fn po_box_number_is_uppercased() {
        let record = Address {
            po_box_number: s(" hq77 "),
            post_town: s("FAREHAM"),
            ..Address::default()
        };

        assert_eq!(format_address(&record), ["PO Box HQ77", "FAREHAM"]);
    }

    #[test]
    fn blank_record_yields_no_lines() {
        assert_eq!(format_address(&Address::default()), Vec::<String>::new());

        let record = Address {
            organisation_name: s("   "),
            thoroughfare_name: s(" \t "),
            post_town: s(""),
            ..Address::default()
        };
        assert_eq!(format_address(&record), Vec::<String>::new());
    }

    #[test]
    fn no_line_is_blank() {
        let record = Address {
            organisation_name: s("  LEDA ENGINEERING LTD  "),
            building_number: s(" 1 "),
            thoroughfare_name: s(" ACACIA "),
            thoroughfare_descriptor: s(" AVENUE "),
            post_town: s(" ABINGDON "),
            postcode: s(" OX14 4PG "),
            ..Address::default()
        };

        let lines = format_address(&record);
        assert_eq!(
            lines,
            ["LEDA ENGINEERING LTD", "1 ACACIA AVENUE", "ABINGDON", "OX14 4PG"]
        );
        assert!(lines.iter().all(|line| !line.trim().is_empty()));
    }

    #[test]
    fn number_without_a_following_line_is_dropped() {
        let record = Address {
            building_name: s("VICTORIA HOUSE"),
            building_number: s("15"),
            ..Address::default()
        };

        assert_eq!(format_address(&record), ["VICTORIA HOUSE"]);
    }
}
