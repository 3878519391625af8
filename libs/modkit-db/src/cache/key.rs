use std::collections::BTreeSet;

use modkit_security::{IdFilter, ResourceId, Specification, TenantId};

/// Canonical rendering of one leaf: a tag followed by JSON-quoted arguments.
///
/// Quoting keeps the rendering injective, so a value containing `,` or `)`
/// cannot impersonate another argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafKey {
    repr: String,
    args: usize,
}

impl LeafKey {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            repr: format!("{tag}("),
            args: 0,
        }
    }

    /// Append a scalar argument.
    #[must_use]
    pub fn field(mut self, value: &str) -> Self {
        self.separate();
        self.repr.push_str(&quote(value));
        self
    }

    /// Append a set argument. Order and duplicates in `values` do not matter.
    #[must_use]
    pub fn values<'a>(mut self, values: impl IntoIterator<Item = &'a str>) -> Self {
        let sorted: BTreeSet<&str> = values.into_iter().collect();
        let rendered: Vec<String> = sorted.into_iter().map(quote).collect();
        self.separate();
        self.repr.push('[');
        self.repr.push_str(&rendered.join(","));
        self.repr.push(']');
        self
    }

    #[must_use]
    pub fn into_string(mut self) -> String {
        self.repr.push(')');
        self.repr
    }

    fn separate(&mut self) {
        if self.args > 0 {
            self.repr.push(',');
        }
        self.args += 1;
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// `tenant("<id>")`.
#[must_use]
pub fn tenant_key(tenant: &TenantId) -> LeafKey {
    LeafKey::new("tenant").field(tenant.as_str())
}

/// `id.in([..])` / `id.not_in([..])`.
#[must_use]
pub fn id_filter_key<Id: ResourceId>(filter: &IdFilter<Id>) -> LeafKey {
    let tag = match filter {
        IdFilter::In(_) => "id.in",
        IdFilter::NotIn(_) => "id.not_in",
    };
    LeafKey::new(tag).values(filter.ids().iter().map(ResourceId::as_str))
}

/// Turns a resource's specification tree into a canonical cache key.
///
/// Conjunction children are sorted and de-duplicated before they are joined,
/// so `a.and(b)` and `b.and(a)` share a key. Leaf keys carry their
/// arguments verbatim, so different tenants never share one.
pub trait CacheKeyGenerator {
    type Leaf;

    /// Key namespace, normally the resource type name.
    const NAMESPACE: &'static str;

    fn leaf_key(leaf: &Self::Leaf) -> LeafKey;

    fn key(spec: &Specification<Self::Leaf>) -> String {
        format!("{}:{}", Self::NAMESPACE, canonical::<Self>(spec))
    }
}

fn canonical<G: CacheKeyGenerator + ?Sized>(spec: &Specification<G::Leaf>) -> String {
    match spec {
        Specification::Leaf(leaf) => G::leaf_key(leaf).into_string(),
        Specification::And(conjunction) => {
            let parts: BTreeSet<String> = conjunction
                .children()
                .iter()
                .map(canonical::<G>)
                .collect();
            if parts.len() == 1 {
                return parts.into_iter().collect();
            }
            let joined: Vec<String> = parts.into_iter().collect();
            format!("all({})", joined.join(","))
        }
    }
}
