use uuid::Uuid;

use crate::identifier::TenantId;

/// Authenticated caller of a request.
///
/// Passed to the decision source as the subject; never used to derive access
/// by itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityContext {
    subject_id: Uuid,
    subject_tenant_id: Option<TenantId>,
    subject_type: Option<String>,
    token_scopes: Vec<String>,
}

impl SecurityContext {
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Context with a nil subject and no tenant.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::builder().build()
    }

    #[inline]
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    #[inline]
    #[must_use]
    pub fn subject_tenant_id(&self) -> Option<&TenantId> {
        self.subject_tenant_id.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn subject_type(&self) -> Option<&str> {
        self.subject_type.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn token_scopes(&self) -> &[String] {
        &self.token_scopes
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.subject_id.is_nil()
    }
}

#[derive(Debug, Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<Uuid>,
    subject_tenant_id: Option<TenantId>,
    subject_type: Option<String>,
    token_scopes: Vec<String>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, id: Uuid) -> Self {
        self.subject_id = Some(id);
        self
    }

    #[must_use]
    pub fn subject_tenant_id(mut self, tenant: TenantId) -> Self {
        self.subject_tenant_id = Some(tenant);
        self
    }

    #[must_use]
    pub fn subject_type(mut self, subject_type: impl Into<String>) -> Self {
        self.subject_type = Some(subject_type.into());
        self
    }

    #[must_use]
    pub fn token_scopes(mut self, scopes: Vec<String>) -> Self {
        self.token_scopes = scopes;
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id.unwrap_or_else(Uuid::nil),
            subject_tenant_id: self.subject_tenant_id,
            subject_type: self.subject_type,
            token_scopes: self.token_scopes,
        }
    }
}
