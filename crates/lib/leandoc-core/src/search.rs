//! Name search over a loaded dataset.
//!
//! Queries are literal, case-insensitive substrings. Results come back in
//! dataset order and stop at the first `max_results` matches; nothing is
//! ranked.

use std::fmt;
use std::str::FromStr;

use leandoc_store::models::{Dataset, SearchResult};
use leandoc_store::schema::doc_url;
use serde::{Deserialize, Serialize};

/// Which dataset collections a search scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    Declarations,
    Instances,
    Modules,
    All,
}

impl SearchScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declarations => "declarations",
            Self::Instances => "instances",
            Self::Modules => "modules",
            Self::All => "all",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "declarations" | "declaration" => Ok(Self::Declarations),
            "instances" | "instance" => Ok(Self::Instances),
            "modules" | "module" => Ok(Self::Modules),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown search scope `{other}` (expected declarations, instances, modules, or all)"
            )),
        }
    }
}

/// Case-insensitive literal substring matcher.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    needle: String,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.needle.is_empty() || name.to_lowercase().contains(&self.needle)
    }
}

/// Returns the first `max_results` declarations whose name contains `query`.
pub fn search_declarations(query: &str, dataset: &Dataset, max_results: usize) -> Vec<SearchResult> {
    let matcher = QueryMatcher::new(query);
    dataset
        .declarations
        .iter()
        .filter(|record| matcher.is_match(&record.name))
        .take(max_results)
        .map(SearchResult::declaration)
        .collect()
}

/// Returns the first `max_results` instance names containing `query`.
pub fn search_instances(query: &str, dataset: &Dataset, max_results: usize) -> Vec<SearchResult> {
    let matcher = QueryMatcher::new(query);
    dataset
        .instances
        .iter()
        .flat_map(|class| class.instances.iter())
        .filter(|name| matcher.is_match(name))
        .take(max_results)
        .map(|name| SearchResult::Instance { name: name.clone() })
        .collect()
}

/// Returns the first `max_results` modules whose name contains `query`.
pub fn search_modules(query: &str, dataset: &Dataset, max_results: usize) -> Vec<SearchResult> {
    let matcher = QueryMatcher::new(query);
    dataset
        .modules
        .iter()
        .filter(|module| matcher.is_match(&module.name))
        .take(max_results)
        .map(|module| SearchResult::Module {
            name: module.name.clone(),
            url: doc_url(&module.url),
            imported_by: module.imported_by.clone(),
        })
        .collect()
}

/// Runs `query` against the collections selected by `scope`.
///
/// `SearchScope::All` scans declarations, then instances, then modules, with
/// one shared cap.
pub fn search(
    query: &str,
    dataset: &Dataset,
    scope: SearchScope,
    max_results: usize,
) -> Vec<SearchResult> {
    match scope {
        SearchScope::Declarations => search_declarations(query, dataset, max_results),
        SearchScope::Instances => search_instances(query, dataset, max_results),
        SearchScope::Modules => search_modules(query, dataset, max_results),
        SearchScope::All => {
            let mut results = search_declarations(query, dataset, max_results);
            let remaining = max_results - results.len();
            results.extend(search_instances(query, dataset, remaining));
            let remaining = max_results - results.len();
            results.extend(search_modules(query, dataset, remaining));
            results
        }
    }
}

#[cfg(test)]
mod tests {
    use leandoc_store::models::{DeclarationRecord, InstanceClass, ModuleRecord};

    use super::*;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new(vec![
            DeclarationRecord::new("Nat.add_comm").with_kind("theorem"),
            DeclarationRecord::new("mul_comm").with_kind("theorem"),
            DeclarationRecord::new("AddCommGroup").with_kind("class"),
            DeclarationRecord::new("Nat.sub").with_kind("def"),
            DeclarationRecord::new("ADD_assoc"),
        ]);
        dataset.instances = vec![InstanceClass {
            class: "Add".to_string(),
            instances: vec!["instAddNat".to_string(), "Int.instAddInt".to_string()],
        }];
        dataset.modules = vec![ModuleRecord {
            name: "Mathlib.Algebra.Group.Defs".to_string(),
            url: "./Mathlib/Algebra/Group/Defs.html".to_string(),
            imported_by: vec![],
        }];
        dataset
    }

    fn names(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(SearchResult::name).collect()
    }

    #[test]
    fn matches_case_insensitive_substrings_in_order() {
        let results = search_declarations("add", &dataset(), 10);
        assert_eq!(names(&results), ["Nat.add_comm", "AddCommGroup", "ADD_assoc"]);
        for result in &results {
            assert!(result.name().to_lowercase().contains("add"));
        }
    }

    #[test]
    fn cap_keeps_first_matches() {
        let results = search_declarations("add", &dataset(), 2);
        assert_eq!(names(&results), ["Nat.add_comm", "AddCommGroup"]);
    }

    #[test]
    fn zero_cap_and_no_match_yield_nothing() {
        assert!(search_declarations("add", &dataset(), 0).is_empty());
        assert!(search_declarations("lattice", &dataset(), 10).is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(search_declarations("", &dataset(), 10).len(), 5);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let dataset = Dataset::new(vec![
            DeclarationRecord::new("Nat.add"),
            DeclarationRecord::new("Natxadd"),
            DeclarationRecord::new("List.get?"),
        ]);

        assert_eq!(names(&search_declarations("Nat.add", &dataset, 10)), ["Nat.add"]);
        assert_eq!(names(&search_declarations("get?", &dataset, 10)), ["List.get?"]);
        assert!(search_declarations(".*", &dataset, 10).is_empty());
    }

    #[test]
    fn missing_fields_surface_as_defaults() {
        let results = search_declarations("assoc", &dataset(), 10);
        assert_eq!(
            results,
            [SearchResult::Declaration {
                name: "ADD_assoc".to_string(),
                kind: "unknown".to_string(),
                doc_link: String::new(),
            }]
        );
    }

    #[test]
    fn instance_and_module_scopes() {
        let dataset = dataset();

        let instances = search("instadd", &dataset, SearchScope::Instances, 10);
        assert_eq!(names(&instances), ["instAddNat", "Int.instAddInt"]);

        let modules = search("group", &dataset, SearchScope::Modules, 10);
        assert_eq!(
            modules,
            [SearchResult::Module {
                name: "Mathlib.Algebra.Group.Defs".to_string(),
                url: "https://leanprover-community.github.io/mathlib4_docs/Mathlib/Algebra/Group/Defs.html"
                    .to_string(),
                imported_by: vec![],
            }]
        );
    }

    #[test]
    fn all_scope_shares_one_cap() {
        let dataset = dataset();

        let results = search("add", &dataset, SearchScope::All, 4);
        assert_eq!(
            names(&results),
            ["Nat.add_comm", "AddCommGroup", "ADD_assoc", "instAddNat"]
        );
        assert!(search("add", &dataset, SearchScope::All, 0).is_empty());
    }

    #[test]
    fn scope_parses_from_cli_text() {
        assert_eq!("Modules".parse::<SearchScope>(), Ok(SearchScope::Modules));
        assert_eq!("all".parse::<SearchScope>(), Ok(SearchScope::All));
        assert!("everything".parse::<SearchScope>().is_err());
    }
}
