use std::collections::BTreeMap;

use crate::data::PersonData;
use crate::tag;

/// Fallback self-reference when a person's calling table has no `me` entry.
pub const DEFAULT_SELF_REFERENCE: &str = "私";

/// Calling-table key that names the speaker's own self-reference.
pub const SELF_KEY: &str = "me";

/// Maps tag keys to display names for global `$key` substitution.
///
/// Keys are kept sorted. Each entity contributes its bare id plus
/// kind-qualified variants, so `$taro`, `$p_taro` and `$fn_taro` all resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDatabase {
    names: BTreeMap<String, String>,
}

impl NameDatabase {
    /// An empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a person under `key`, `p_key`, `fn_key`, `ln_key`, `full_key`
    /// and `efull_key`.
    pub fn add_person(&mut self, key: &str, person: &PersonData) {
        let name = person.name.as_str();
        let (last, first) = match person.fullname.split_once(',') {
            Some((last, first)) => (last.trim(), first.trim()),
            None => ("", ""),
        };
        let first_or_name = if first.is_empty() { name } else { first };
        let last_or_name = if last.is_empty() { name } else { last };
        let (full, efull) = if first.is_empty() {
            (name.to_string(), name.to_string())
        } else {
            (
                format!("{last_or_name}{first_or_name}"),
                format!("{first_or_name}・{last_or_name}"),
            )
        };

        self.insert(key.to_string(), name);
        self.insert(format!("p_{key}"), name);
        self.insert(format!("fn_{key}"), first_or_name);
        self.insert(format!("ln_{key}"), last_or_name);
        self.insert(format!("full_{key}"), &full);
        self.insert(format!("efull_{key}"), &efull);
    }

    /// Register a stage under `key` and `st_key`.
    pub fn add_stage(&mut self, key: &str, name: &str) {
        self.insert(key.to_string(), name);
        self.insert(format!("st_{key}"), name);
    }

    /// Register an item under `key` and `i_key`.
    pub fn add_item(&mut self, key: &str, name: &str) {
        self.insert(key.to_string(), name);
        self.insert(format!("i_{key}"), name);
    }

    /// Register a glossary word under `key` and `w_key`.
    pub fn add_word(&mut self, key: &str, name: &str) {
        self.insert(key.to_string(), name);
        self.insert(format!("w_{key}"), name);
    }

    /// Look up a display name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(key, name)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve every known tag in `text`.
    pub fn substitute(&self, text: &str, prefix: &str) -> String {
        tag::substitute(text, self.iter(), prefix)
    }

    fn insert(&mut self, key: String, name: &str) {
        self.names.insert(key, name.to_string());
    }
}

/// Per-person calling tables: how each character refers to the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callings {
    by_subject: BTreeMap<String, BTreeMap<String, String>>,
}

impl Callings {
    /// An empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a person's calling table.
    pub fn insert(&mut self, subject: &str, table: BTreeMap<String, String>) {
        self.by_subject.insert(subject.to_string(), table);
    }

    /// Returns `true` if the subject has a calling table.
    pub fn contains(&self, subject: &str) -> bool {
        self.by_subject.contains_key(subject)
    }

    /// Tags for text spoken or performed by `subject`: the author's entries,
    /// then `S` (a `$subject` tag for later name resolution) and `M` (the
    /// subject's self-reference).
    pub fn tags_for(&self, subject: &str) -> Option<Vec<(String, String)>> {
        let table = self.by_subject.get(subject)?;
        let mut tags: Vec<(String, String)> = table
            .iter()
            .filter(|(k, _)| k.as_str() != "S" && k.as_str() != "M")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        tags.push(("S".into(), format!("{}{subject}", tag::DEFAULT_PREFIX)));
        let me = table
            .get(SELF_KEY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SELF_REFERENCE);
        tags.push(("M".into(), me.to_string()));
        Some(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, fullname: &str) -> PersonData {
        PersonData {
            name: name.into(),
            fullname: fullname.into(),
            calling: BTreeMap::new(),
        }
    }

    #[test]
    fn person_variants() {
        let mut db = NameDatabase::new();
        db.add_person("taro", &person("太郎", "山田,太郎"));
        assert_eq!(db.get("taro"), Some("太郎"));
        assert_eq!(db.get("p_taro"), Some("太郎"));
        assert_eq!(db.get("fn_taro"), Some("太郎"));
        assert_eq!(db.get("ln_taro"), Some("山田"));
        assert_eq!(db.get("full_taro"), Some("山田太郎"));
        assert_eq!(db.get("efull_taro"), Some("太郎・山田"));
    }

    #[test]
    fn person_without_fullname_falls_back_to_name() {
        let mut db = NameDatabase::new();
        db.add_person("hana", &person("Hana", ""));
        assert_eq!(db.get("fn_hana"), Some("Hana"));
        assert_eq!(db.get("ln_hana"), Some("Hana"));
        assert_eq!(db.get("full_hana"), Some("Hana"));
        assert_eq!(db.get("efull_hana"), Some("Hana"));
    }

    #[test]
    fn person_with_only_last_name() {
        let mut db = NameDatabase::new();
        db.add_person("doc", &person("Doc", "Brown,"));
        assert_eq!(db.get("ln_doc"), Some("Brown"));
        assert_eq!(db.get("fn_doc"), Some("Doc"));
        assert_eq!(db.get("full_doc"), Some("Doc"));
    }

    #[test]
    fn stage_item_word_prefixes() {
        let mut db = NameDatabase::new();
        db.add_stage("port", "港町");
        db.add_item("key", "鍵");
        db.add_word("magic", "魔法");
        assert_eq!(db.get("st_port"), Some("港町"));
        assert_eq!(db.get("i_key"), Some("鍵"));
        assert_eq!(db.get("w_magic"), Some("魔法"));
        assert_eq!(db.len(), 6);
    }

    #[test]
    fn keys_are_sorted() {
        let mut db = NameDatabase::new();
        db.add_word("zeta", "z");
        db.add_word("alpha", "a");
        let keys: Vec<_> = db.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "w_alpha", "w_zeta", "zeta"]);
    }

    #[test]
    fn substitutes_names() {
        let mut db = NameDatabase::new();
        db.add_stage("port", "港町");
        assert_eq!(db.substitute("$st_port に着いた", "$"), "港町 に着いた");
    }

    #[test]
    fn calling_tags_append_self_and_me() {
        let mut callings = Callings::new();
        let mut table = BTreeMap::new();
        table.insert("hana".to_string(), "お前".to_string());
        table.insert("me".to_string(), "俺".to_string());
        callings.insert("taro", table);

        let tags = callings.tags_for("taro").unwrap();
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[2], ("S".to_string(), "$taro".to_string()));
        assert_eq!(tags[3], ("M".to_string(), "俺".to_string()));
    }

    #[test]
    fn calling_without_me_uses_default() {
        let mut callings = Callings::new();
        callings.insert("hana", BTreeMap::new());
        let tags = callings.tags_for("hana").unwrap();
        assert_eq!(tags.last().map(|(_, v)| v.as_str()), Some(DEFAULT_SELF_REFERENCE));
        assert!(callings.tags_for("nobody").is_none());
    }
}
