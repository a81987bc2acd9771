//! Policy: the explicit configuration threaded through every encode/bind call.
//!
//! `Policy` has no `Default`: every call site states how nulls, unknown
//! keys and boolean aliases are handled. The types deserialize with
//! `serde`, so a policy can live in an application's configuration file,
//! where every field is required as well.

use serde::{Deserialize, Serialize};

/// What `bind` does with an input key no field claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldAction {
    Ignore,
    Error,
}

/// Order in which a boolean field's wire name and its `is`-prefixed alias
/// are looked up while binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanNameResolution {
    /// Only `json_name`; the alias is never consulted.
    ExactOnly,
    /// `json_name`, then the alias.
    PreferBareThenIs,
    /// The alias, then `json_name`.
    PreferIsThenBare,
}

impl BooleanNameResolution {
    pub fn uses_alias(self) -> bool {
        !matches!(self, Self::ExactOnly)
    }

    /// Keys to try, in order, for a field named `json_name` with `alias`.
    pub fn candidates<'a>(self, json_name: &'a str, alias: Option<&'a str>) -> [Option<&'a str>; 2] {
        match (self, alias) {
            (Self::ExactOnly, _) | (_, None) => [Some(json_name), None],
            (Self::PreferBareThenIs, Some(alias)) => [Some(json_name), Some(alias)],
            (Self::PreferIsThenBare, Some(alias)) => [Some(alias), Some(json_name)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    /// Emit `"field":null` for null fields instead of omitting them.
    pub emit_nulls: bool,
    pub unknown_fields: UnknownFieldAction,
    pub boolean_names: BooleanNameResolution,
}

impl Policy {
    pub const fn new(
        emit_nulls: bool,
        unknown_fields: UnknownFieldAction,
        boolean_names: BooleanNameResolution,
    ) -> Self {
        Self {
            emit_nulls,
            unknown_fields,
            boolean_names,
        }
    }

    pub const fn with_emit_nulls(mut self, emit_nulls: bool) -> Self {
        self.emit_nulls = emit_nulls;
        self
    }

    pub const fn with_unknown_fields(mut self, unknown_fields: UnknownFieldAction) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    pub const fn with_boolean_names(mut self, boolean_names: BooleanNameResolution) -> Self {
        self.boolean_names = boolean_names;
        self
    }
}
