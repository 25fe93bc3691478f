use std::collections::BTreeMap;

use _paf::Address;

use crate::records::{AddressRow, LocalityRow, NameRow, OrganisationRow};

/// Reference records accumulated in memory, keyed for resolving the
/// foreign keys held by address rows.
#[derive(Default)]
pub struct Repository {
    building_names: BTreeMap<u32, String>,
    sub_building_names: BTreeMap<u32, String>,
    thoroughfares: BTreeMap<u32, String>,
    descriptors: BTreeMap<u32, String>,
    localities: BTreeMap<u32, LocalityRow>,
    organisations: BTreeMap<u32, OrganisationRow>,
}

impl Repository {
    pub fn add_building_name(&mut self, row: NameRow) {
        if let Some(name) = row.name {
            self.building_names.insert(row.key, name);
        }
    }

    pub fn add_sub_building_name(&mut self, row: NameRow) {
        if let Some(name) = row.name {
            self.sub_building_names.insert(row.key, name);
        }
    }

    pub fn add_thoroughfare(&mut self, row: NameRow) {
        if let Some(name) = row.name {
            self.thoroughfares.insert(row.key, name);
        }
    }

    pub fn add_thoroughfare_descriptor(&mut self, row: NameRow) {
        if let Some(name) = row.name {
            self.descriptors.insert(row.key, name);
        }
    }

    pub fn add_locality(&mut self, row: LocalityRow) {
        self.localities.insert(row.key, row);
    }

    pub fn add_organisation(&mut self, row: OrganisationRow) {
        self.organisations.insert(row.key, row);
    }

    /// Resolves an address row into the flat record the formatter
    /// takes. Dangling keys resolve to absent fields.
    pub fn resolve(&self, row: &AddressRow) -> Address {
        let mut address = Address {
            postcode: row.postcode.clone(),
            building_number: row.building_number.map(|x| x.to_string()),
            concatenate_building_number: row.concatenate_building_number,
            po_box_number: row.po_box_number.clone(),
            building_name: lookup(&self.building_names, row.building_name_key),
            sub_building_name: lookup(&self.sub_building_names, row.sub_building_name_key),
            thoroughfare_name: lookup(&self.thoroughfares, row.thoroughfare_key),
            thoroughfare_descriptor: lookup(&self.descriptors, row.thoroughfare_descriptor_key),
            dependent_thoroughfare_name: lookup(&self.thoroughfares, row.dependent_thoroughfare_key),
            dependent_thoroughfare_descriptor: lookup(
                &self.descriptors,
                row.dependent_thoroughfare_descriptor_key,
            ),
            ..Address::default()
        };

        if let Some(locality) = row.locality_key.and_then(|key| self.localities.get(&key)) {
            address.post_town = locality.post_town.clone();
            address.dependent_locality = locality.dependent_locality.clone();
            address.double_dependent_locality = locality.double_dependent_locality.clone();
        }

        if let Some(organisation) = row
            .organisation_key
            .and_then(|key| self.organisations.get(&key))
        {
            address.organisation_name = organisation.name.clone();
            address.department_name = organisation.department.clone();
        }

        address
    }
}

fn lookup(table: &BTreeMap<u32, String>, key: Option<u32>) -> Option<String> {
    key.and_then(|key| table.get(&key)).cloned()
}
