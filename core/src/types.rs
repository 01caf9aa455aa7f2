//! Query-parameter value objects for the content API.
//!
//! # Design
//! The wire format is an ordered list of string pairs ([`Params`]) so the
//! query string reproduces the caller's insertion order exactly. The typed
//! structs mirror the parameters the API documents for each endpoint and
//! convert into `Params`, emitting only the fields that were actually set.

/// Ordered query-string pairs. Order is preserved in the built URL.
pub type Params = Vec<(String, String)>;

/// Parameters recognized by the navigation endpoint.
///
/// Unset fields are omitted from the query string entirely; the server
/// applies its own defaults (an effective `depth` of 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    /// How many levels of the navigation tree to include.
    pub depth: Option<u32>,
    /// Include excerpt data on each item.
    pub excerpt: Option<bool>,
    /// Return the tree flattened into a single list.
    pub flat: Option<bool>,
}

impl From<NavigationParams> for Params {
    fn from(p: NavigationParams) -> Self {
        let mut params = Params::new();
        if let Some(depth) = p.depth {
            params.push(("depth".to_string(), depth.to_string()));
        }
        if let Some(excerpt) = p.excerpt {
            params.push(("excerpt".to_string(), excerpt.to_string()));
        }
        if let Some(flat) = p.flat {
            params.push(("flat".to_string(), flat.to_string()));
        }
        params
    }
}

/// Parameters recognized by the snippet-area endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetAreaParams {
    /// Include the snippet's extension data. Wire key is `includeExtension`.
    pub include_extension: Option<bool>,
}

impl From<SnippetAreaParams> for Params {
    fn from(p: SnippetAreaParams) -> Self {
        let mut params = Params::new();
        if let Some(include) = p.include_extension {
            params.push(("includeExtension".to_string(), include.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_params_default_is_empty() {
        let params: Params = NavigationParams::default().into();
        assert!(params.is_empty());
    }

    #[test]
    fn navigation_params_emit_set_fields_in_order() {
        let params: Params = NavigationParams {
            depth: Some(2),
            excerpt: Some(true),
            flat: Some(false),
        }
        .into();
        assert_eq!(
            params,
            vec![
                ("depth".to_string(), "2".to_string()),
                ("excerpt".to_string(), "true".to_string()),
                ("flat".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn navigation_params_skip_unset_fields() {
        let params: Params = NavigationParams {
            depth: None,
            excerpt: None,
            flat: Some(true),
        }
        .into();
        assert_eq!(params, vec![("flat".to_string(), "true".to_string())]);
    }

    #[test]
    fn snippet_area_params_use_camel_case_wire_key() {
        let params: Params = SnippetAreaParams {
            include_extension: Some(true),
        }
        .into();
        assert_eq!(
            params,
            vec![("includeExtension".to_string(), "true".to_string())]
        );
    }
}
