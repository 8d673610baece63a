//! Tenancy scope and per-call context types.

use super::{AssetCategoryId, AssetLinkId, CompanyId, GroupId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tenancy pair under which tasks are created and queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Owning company identifier.
    pub company_id: CompanyId,
    /// Owning group identifier within the company.
    pub group_id: GroupId,
}

impl Scope {
    /// Creates a scope from its tenancy components.
    #[must_use]
    pub const fn new(company_id: CompanyId, group_id: GroupId) -> Self {
        Self {
            company_id,
            group_id,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.company_id, self.group_id)
    }
}

/// Half-open pagination window over a result list.
///
/// `start` is inclusive, `end` exclusive. No ordering guarantee is made
/// beyond stability under no concurrent writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageBounds {
    start: usize,
    end: usize,
}

impl PageBounds {
    /// Creates a pagination window; an inverted window yields no rows.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Window covering the entire result list.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: 0,
            end: usize::MAX,
        }
    }

    /// Returns the inclusive start index.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Returns the exclusive end index.
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Returns the maximum number of rows the window admits.
    #[must_use]
    pub const fn size(self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl Default for PageBounds {
    fn default() -> Self {
        Self::all()
    }
}

/// Asset inputs accompanying a create or update call.
///
/// The caller supplies the categorization the asset projection should carry;
/// the service derives everything else from the task record itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetContext {
    /// Category identifiers to attach to the projection.
    pub category_ids: Vec<AssetCategoryId>,
    /// Tag names to attach to the projection.
    pub tag_names: Vec<String>,
    /// Asset entries the projection links to as related content.
    pub link_ids: Vec<AssetLinkId>,
    /// Search priority of the projection, when ranked.
    pub priority: Option<f64>,
}

impl AssetContext {
    /// Creates an empty asset context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets category identifiers.
    #[must_use]
    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = AssetCategoryId>) -> Self {
        self.category_ids = category_ids.into_iter().collect();
        self
    }

    /// Sets tag names.
    #[must_use]
    pub fn with_tags(mut self, tag_names: impl IntoIterator<Item = String>) -> Self {
        self.tag_names = tag_names.into_iter().collect();
        self
    }

    /// Sets related asset links.
    #[must_use]
    pub fn with_links(mut self, link_ids: impl IntoIterator<Item = AssetLinkId>) -> Self {
        self.link_ids = link_ids.into_iter().collect();
        self
    }

    /// Sets the search priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Acting context of a service call.
///
/// Carries the group the mutation is scoped to, an optional caller-supplied
/// UUID for the created record, and the asset inputs. The company half of
/// the scope comes from the acting user's resolved identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeContext {
    /// Group the call is scoped to.
    pub group_id: GroupId,
    /// Caller-supplied UUID for a created task; generated when absent.
    pub uuid: Option<Uuid>,
    /// Asset inputs for the projection refresh.
    pub asset: AssetContext,
}

impl ScopeContext {
    /// Creates a context scoped to the given group.
    #[must_use]
    pub fn for_group(group_id: GroupId) -> Self {
        Self {
            group_id,
            uuid: None,
            asset: AssetContext::default(),
        }
    }

    /// Sets the caller-supplied UUID.
    #[must_use]
    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// Sets the asset inputs.
    #[must_use]
    pub fn with_asset(mut self, asset: AssetContext) -> Self {
        self.asset = asset;
        self
    }
}
