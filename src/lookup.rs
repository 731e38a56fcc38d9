//! Categorical lookup with a default
//!
//! A lookup is built once from a fixed table and then applied to any number
//! of inputs. Inputs that are absent from the table, or absent altogether,
//! resolve to the default.
//!
//! Two forms are provided:
//! - [`CategoricalLookup`] for statically-typed keys and values
//! - [`ScalarLookup`] for untyped cells with a declared output type, which
//!   validates the table shape at construction

use crate::scalar::{Scalar, ScalarType};
use ahash::AHashMap;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building a lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The table is not a key/value mapping
    #[error("Lookup table must be a mapping, got {0}")]
    NotAMapping(String),

    /// A key appears more than once
    #[error("Duplicate lookup key: {0}")]
    DuplicateKey(String),

    /// Table keys are not all of one type
    #[error("Lookup keys must share one type: found {expected} and {found}")]
    MixedKeyTypes {
        expected: ScalarType,
        found: ScalarType,
    },

    /// A key is null
    #[error("Lookup keys must not be null")]
    NullKey,

    /// A table value is not a scalar
    #[error("Lookup value for key {key} is not a scalar: {value}")]
    UnsupportedValue { key: String, value: String },

    /// A table value does not match the declared output type
    #[error("Lookup value for key {key} must be {expected}, got {value}")]
    ValueTypeMismatch {
        key: String,
        expected: ScalarType,
        value: String,
    },

    /// The default does not match the declared output type
    #[error("Lookup default must be {expected}, got {value}")]
    DefaultTypeMismatch { expected: ScalarType, value: String },
}

/// Immutable table-driven substitution.
///
/// Clones share the table, so a lookup can be handed to many workers
/// without copying or locking.
#[derive(Debug)]
pub struct CategoricalLookup<K, V> {
    table: Arc<AHashMap<K, V>>,
    default: V,
}

impl<K, V: Clone> Clone for CategoricalLookup<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            default: self.default.clone(),
        }
    }
}

impl<K, V> CategoricalLookup<K, V>
where
    K: Eq + Hash + Debug,
    V: Clone,
{
    /// Build from key/value pairs, rejecting repeated keys.
    pub fn new<I>(entries: I, default: V) -> Result<Self, LookupError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = entries.into_iter();
        let mut table = AHashMap::with_capacity(entries.size_hint().0);
        for (key, value) in entries {
            if table.contains_key(&key) {
                return Err(LookupError::DuplicateKey(format!("{key:?}")));
            }
            table.insert(key, value);
        }
        tracing::debug!(entries = table.len(), "built categorical lookup");
        Ok(Self {
            table: Arc::new(table),
            default,
        })
    }

    /// Build from a map; keys are unique by construction.
    #[must_use]
    pub fn from_map(map: HashMap<K, V>, default: V) -> Self {
        let table: AHashMap<K, V> = map.into_iter().collect();
        tracing::debug!(entries = table.len(), "built categorical lookup");
        Self {
            table: Arc::new(table),
            default,
        }
    }

    /// Mapped value, or the default for an unknown or absent input.
    #[inline]
    #[must_use]
    pub fn get<Q>(&self, input: Option<&Q>) -> &V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        input
            .and_then(|key| self.table.get(key))
            .unwrap_or(&self.default)
    }

    /// Owned form of [`get`](Self::get).
    #[inline]
    #[must_use]
    pub fn apply<Q>(&self, input: Option<&Q>) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(input).clone()
    }

    #[must_use]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Turn the lookup into a plain unary function.
    pub fn into_fn(self) -> impl Fn(Option<&K>) -> V + Send + Sync + Clone
    where
        K: Send + Sync,
        V: Send + Sync,
    {
        move |input: Option<&K>| self.apply(input)
    }
}

/// Build a lookup function from a table and a default.
///
/// ```
/// use std::collections::HashMap;
/// use fuzzycol::build_categorical_lookup;
///
/// let table = HashMap::from([("a", "AA"), ("b", "BB")]);
/// let map_key = build_categorical_lookup(table, "__");
/// assert_eq!(map_key(Some(&"a")), "AA");
/// assert_eq!(map_key(Some(&"c")), "__");
/// assert_eq!(map_key(None), "__");
/// ```
pub fn build_categorical_lookup<K, V>(
    table: HashMap<K, V>,
    default: V,
) -> impl Fn(Option<&K>) -> V + Send + Sync + Clone
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    CategoricalLookup::from_map(table, default).into_fn()
}

/// Lookup over untyped cells with a declared output type.
#[derive(Debug, Clone)]
pub struct ScalarLookup {
    inner: CategoricalLookup<Scalar, Scalar>,
    key_type: Option<ScalarType>,
    output_type: ScalarType,
}

impl ScalarLookup {
    /// Build from key/value pairs.
    ///
    /// Keys must be non-null and of one type; values and the default must
    /// fit `output_type` (null always fits, integers widen to doubles).
    pub fn from_entries<I>(
        entries: I,
        default: Scalar,
        output_type: ScalarType,
    ) -> Result<Self, LookupError>
    where
        I: IntoIterator<Item = (Scalar, Scalar)>,
    {
        if !default.fits(output_type) {
            return Err(LookupError::DefaultTypeMismatch {
                expected: output_type,
                value: default.to_string(),
            });
        }

        let mut key_type: Option<ScalarType> = None;
        let mut checked = Vec::new();
        for (key, value) in entries {
            let this_type = key.scalar_type().ok_or(LookupError::NullKey)?;
            match key_type {
                None => key_type = Some(this_type),
                Some(expected) if expected != this_type => {
                    return Err(LookupError::MixedKeyTypes {
                        expected,
                        found: this_type,
                    });
                }
                Some(_) => {}
            }
            if !value.fits(output_type) {
                return Err(LookupError::ValueTypeMismatch {
                    key: key.to_string(),
                    expected: output_type,
                    value: value.to_string(),
                });
            }
            checked.push((key, value.coerce_to(output_type)));
        }

        let inner = CategoricalLookup::new(checked, default.coerce_to(output_type))?;
        tracing::debug!(
            entries = inner.len(),
            output_type = %output_type,
            "built scalar lookup"
        );
        Ok(Self {
            inner,
            key_type,
            output_type,
        })
    }

    /// Build from a JSON object such as `{"a": "AA", "b": "BB"}`.
    ///
    /// Anything other than an object is rejected, as are nested arrays or
    /// objects among the values.
    pub fn from_json(
        table: &serde_json::Value,
        default: Scalar,
        output_type: ScalarType,
    ) -> Result<Self, LookupError> {
        let object = table
            .as_object()
            .ok_or_else(|| LookupError::NotAMapping(json_kind(table).to_string()))?;

        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            if value.is_array() || value.is_object() {
                return Err(LookupError::UnsupportedValue {
                    key: key.clone(),
                    value: value.to_string(),
                });
            }
            let scalar: Scalar = serde_json::from_value(value.clone()).map_err(|_| {
                LookupError::UnsupportedValue {
                    key: key.clone(),
                    value: value.to_string(),
                }
            })?;
            entries.push((Scalar::Str(key.clone()), scalar));
        }
        Self::from_entries(entries, default, output_type)
    }

    /// Parse a JSON document and build from it.
    pub fn from_json_str(
        json: &str,
        default: Scalar,
        output_type: ScalarType,
    ) -> Result<Self, LookupError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|err| LookupError::NotAMapping(format!("unparseable input ({err})")))?;
        Self::from_json(&value, default, output_type)
    }

    /// Mapped value; null and unknown inputs give the default.
    #[must_use]
    pub fn apply(&self, input: &Scalar) -> Scalar {
        if input.is_null() {
            return self.inner.default_value().clone();
        }
        self.inner.apply(Some(input))
    }

    #[must_use]
    pub fn output_type(&self) -> ScalarType {
        self.output_type
    }

    /// Type shared by all keys, `None` for an empty table
    #[must_use]
    pub fn key_type(&self) -> Option<ScalarType> {
        self.key_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
