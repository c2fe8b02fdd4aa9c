//! Model assembly: registered definitions -> finished model

use super::classify::{classify, MemberKind};
use super::keys::resolve_keys;
use super::naming::NamingPolicy;
use super::EntityConfig;
use crate::describe::TypeSet;
use crate::model::{EntitySchema, Model, NavigationProperty, Property};
use std::collections::{HashMap, HashSet};

/// One-shot assembly pass over a cloned registration set
///
/// The memo map guarantees at most one schema record per identity no matter
/// how many registrations or base chains reach it. The in-progress set cuts
/// base cycles a malformed description set could declare.
pub(crate) struct Assembler<'a> {
    types: &'a TypeSet,
    naming: NamingPolicy,
    configs: Vec<EntityConfig>,
    config_index: HashMap<String, usize>,
    entities: HashSet<String>,
    model: Model,
    assembled: HashMap<String, usize>,
    in_progress: HashSet<String>,
}

impl<'a> Assembler<'a> {
    pub(crate) fn run(
        types: &'a TypeSet,
        naming: NamingPolicy,
        configs: Vec<EntityConfig>,
    ) -> Model {
        // The modeled entity names: every registered identity plus every
        // ancestor discoverable through the description set. Navigation
        // classification and implicit base assembly both consult this set.
        let mut entities: HashSet<String> = HashSet::new();
        for config in &configs {
            entities.insert(config.type_name.clone());
            for ancestor in types.ancestors(&config.type_name) {
                entities.insert(ancestor.name.clone());
            }
        }

        let config_index = configs
            .iter()
            .enumerate()
            .map(|(i, c)| (c.type_name.clone(), i))
            .collect();

        let mut assembler = Assembler {
            types,
            naming,
            configs,
            config_index,
            entities,
            model: Model::default(),
            assembled: HashMap::new(),
            in_progress: HashSet::new(),
        };

        // Assemble every registered identity in registration order; bases
        // interleave as the recursion discovers them.
        for i in 0..assembler.configs.len() {
            let name = assembler.configs[i].type_name.clone();
            assembler.assemble(&name);
        }

        // Root every configured collection name at its assembled record.
        for i in 0..assembler.configs.len() {
            let config = &assembler.configs[i];
            if let (Some(collection), Some(&idx)) = (
                config.collection_name.clone(),
                assembler.assembled.get(&config.type_name),
            ) {
                assembler.model.insert_collection(collection, idx);
            }
        }

        assembler.model
    }

    /// Assemble one identity, memoized; returns its arena index
    ///
    /// Returns `None` only when the identity is already being assembled
    /// further up the stack, which cuts a base cycle.
    fn assemble(&mut self, name: &str) -> Option<usize> {
        if let Some(&idx) = self.assembled.get(name) {
            return Some(idx);
        }
        if !self.in_progress.insert(name.to_string()) {
            return None;
        }

        let types = self.types;
        let description = types.get(name);

        // Assemble and link the base first when it is discoverable.
        let base = description
            .and_then(|d| d.base.as_deref())
            .filter(|b| types.contains(b))
            .and_then(|b| {
                let b = b.to_string();
                self.assemble(&b)
            });

        // With a linked base, only own-declared members are attached; the
        // base record already carries the inherited ones.
        let members: Vec<_> = match (description, base) {
            (Some(d), Some(_)) => d.members.iter().collect(),
            (Some(_), None) => types.all_members(name),
            (None, _) => Vec::new(),
        };

        let mut properties = Vec::new();
        let mut navigations = Vec::new();
        for member in members {
            match classify(&member.ty, &self.entities) {
                MemberKind::Simple => {
                    properties.push(Property::new(
                        member.name.as_str(),
                        self.naming.apply(&member.name),
                        member.ty.clone(),
                    ));
                }
                MemberKind::Navigation => {
                    let target = member.ty.reference().unwrap_or_default();
                    navigations.push(NavigationProperty::new(
                        member.name.as_str(),
                        self.naming.apply(&member.name),
                        target,
                    ));
                }
                MemberKind::Excluded => {}
            }
        }

        let keys = self.applied_keys(name, base);

        self.in_progress.remove(name);
        let idx = self.model.insert(EntitySchema {
            name: name.to_string(),
            base,
            properties,
            navigations,
            keys,
        });
        self.assembled.insert(name.to_string(), idx);
        Some(idx)
    }

    /// The keys applied on this record: the resolved key set minus any key
    /// already owned by an ancestor record
    fn applied_keys(&mut self, name: &str, base: Option<usize>) -> Vec<Property> {
        let types = self.types;
        let key_names = match self.config_index.get(name) {
            Some(&i) => resolve_keys(&mut self.configs[i], types),
            // Implicitly discovered base types have no registration record;
            // their keys come from annotations alone.
            None => resolve_keys(&mut EntityConfig::new(name), types),
        };

        let mut inherited: HashSet<String> = HashSet::new();
        let mut current = base;
        while let Some(idx) = current {
            let record = self.model.schema_at(idx);
            inherited.extend(record.keys.iter().map(|k| k.name.clone()));
            current = record.base;
        }

        key_names
            .into_iter()
            .filter(|key| !inherited.contains(key))
            .filter_map(|key| {
                types.member(name, &key).map(|member| {
                    let exposed = self.naming.apply(&key);
                    Property::new(key.as_str(), exposed, member.ty.clone())
                })
            })
            .collect()
    }
}
