use crate::types::AliasMap;
use std::collections::HashMap;

/// Maps alias tokens to canonical table names.
///
/// Resolution is total: an alias with no configured mapping resolves to its
/// own lower-cased text, so existence is decided later against the schema.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    aliases: HashMap<String, String>,
}

impl AliasResolver {
    pub fn new(aliases: &AliasMap) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|(alias, table)| (alias.to_lowercase(), table.to_lowercase()))
                .collect(),
        }
    }

    pub fn resolve(&self, alias: &str) -> String {
        let alias = alias.to_lowercase();
        match self.aliases.get(&alias) {
            Some(table) => table.clone(),
            None => alias,
        }
    }
}
