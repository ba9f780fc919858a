// Facade
//
// `BeeswaxApi` wires one accessor per resource to a single shared session.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::Value;

use crate::error::Error;
use crate::resources::Accessor;
use crate::resources::account::{Account, AccountAlert, AccountSetting};
use crate::resources::admin::{Authentication, Password, Role, User};
use crate::resources::creative::{
    Creative, CreativeAddon, CreativeApproval, CreativeApprovalHistory, CreativeAsset,
    CreativeBulkUpload, CreativeLineItem, CreativeTemplate, VideoAsset,
};
use crate::resources::extension::{
    BidModifier, CustomList, ListItem, ListItemBulkUpload, Misc, NativeOffer, PushQueue, Report,
    ReportQueue, Strategy, TargetingTemplate, Vendor, VendorFee,
};
use crate::resources::monitoring::{ActivityLog, Alert, Dashboard};
use crate::resources::operations::{
    Advertiser, Campaign, Event, EventTag, LineItem, LineItemFlight,
};
use crate::resources::segment::{
    Segment, SegmentCategory, SegmentCategoryAssociation, SegmentCategoryLookup,
    SegmentCategorySharing, SegmentLookup, SegmentSharing, SegmentTag, SegmentUpdate,
    SegmentUpload,
};
use crate::session::Session;

/// Every Beeswax resource, bound to one shared [`Session`].
///
/// ```no_run
/// # async fn demo() -> Result<(), beeswax_api::Error> {
/// use std::sync::Arc;
/// use beeswax_api::{BeeswaxApi, Params, Session};
///
/// let session = Arc::new(Session::default());
/// session.configure("https://acme.api.beeswax.com/rest/")?;
/// let api = BeeswaxApi::connect(session, Some("ops@acme.com"), None).await?;
/// let account: serde_json::Value = api.accounts.retrieve(4, Params::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BeeswaxApi {
    session: Arc<Session>,

    // ── Account ──
    pub accounts: Accessor<Account>,
    pub account_alerts: Accessor<AccountAlert>,
    pub account_settings: Accessor<AccountSetting>,

    // ── Admin ──
    pub authentication: Accessor<Authentication>,
    pub passwords: Accessor<Password>,
    pub roles: Accessor<Role>,
    pub users: Accessor<User>,

    // ── Creatives ──
    pub creatives: Accessor<Creative>,
    pub creative_addons: Accessor<CreativeAddon>,
    pub creative_approvals: Accessor<CreativeApproval>,
    pub creative_approval_history: Accessor<CreativeApprovalHistory>,
    pub creative_assets: Accessor<CreativeAsset>,
    pub video_assets: Accessor<VideoAsset>,
    pub creative_bulk_uploads: Accessor<CreativeBulkUpload>,
    pub creative_line_items: Accessor<CreativeLineItem>,
    pub creative_templates: Accessor<CreativeTemplate>,

    // ── Extensions ──
    pub bid_modifiers: Accessor<BidModifier>,
    pub custom_lists: Accessor<CustomList>,
    pub list_items: Accessor<ListItem>,
    pub list_item_bulk_uploads: Accessor<ListItemBulkUpload>,
    pub native_offers: Accessor<NativeOffer>,
    pub push_queue: Accessor<PushQueue>,
    pub reports: Accessor<Report>,
    pub report_queue: Accessor<ReportQueue>,
    pub strategies: Accessor<Strategy>,
    pub targeting_templates: Accessor<TargetingTemplate>,
    pub vendors: Accessor<Vendor>,
    pub vendor_fees: Accessor<VendorFee>,
    pub misc: Accessor<Misc>,

    // ── Monitoring ──
    pub activity_logs: Accessor<ActivityLog>,
    pub alerts: Accessor<Alert>,
    pub dashboards: Accessor<Dashboard>,

    // ── Operations ──
    pub advertisers: Accessor<Advertiser>,
    pub campaigns: Accessor<Campaign>,
    pub events: Accessor<Event>,
    pub event_tags: Accessor<EventTag>,
    pub line_items: Accessor<LineItem>,
    pub line_item_flights: Accessor<LineItemFlight>,

    // ── Segments ──
    pub segments: Accessor<Segment>,
    pub segment_tags: Accessor<SegmentTag>,
    pub segment_categories: Accessor<SegmentCategory>,
    pub segment_category_associations: Accessor<SegmentCategoryAssociation>,
    pub segment_sharing: Accessor<SegmentSharing>,
    pub segment_category_sharing: Accessor<SegmentCategorySharing>,
    pub segment_lookups: Accessor<SegmentLookup>,
    pub segment_category_lookups: Accessor<SegmentCategoryLookup>,
    pub segment_uploads: Accessor<SegmentUpload>,
    pub segment_updates: Accessor<SegmentUpdate>,
}

impl BeeswaxApi {
    /// Wire every accessor to `session`. Does not touch the network.
    pub fn new(session: Arc<Session>) -> Self {
        let s = || Arc::clone(&session);
        Self {
            accounts: Accessor::new(s()),
            account_alerts: Accessor::new(s()),
            account_settings: Accessor::new(s()),

            authentication: Accessor::new(s()),
            passwords: Accessor::new(s()),
            roles: Accessor::new(s()),
            users: Accessor::new(s()),

            creatives: Accessor::new(s()),
            creative_addons: Accessor::new(s()),
            creative_approvals: Accessor::new(s()),
            creative_approval_history: Accessor::new(s()),
            creative_assets: Accessor::new(s()),
            video_assets: Accessor::new(s()),
            creative_bulk_uploads: Accessor::new(s()),
            creative_line_items: Accessor::new(s()),
            creative_templates: Accessor::new(s()),

            bid_modifiers: Accessor::new(s()),
            custom_lists: Accessor::new(s()),
            list_items: Accessor::new(s()),
            list_item_bulk_uploads: Accessor::new(s()),
            native_offers: Accessor::new(s()),
            push_queue: Accessor::new(s()),
            reports: Accessor::new(s()),
            report_queue: Accessor::new(s()),
            strategies: Accessor::new(s()),
            targeting_templates: Accessor::new(s()),
            vendors: Accessor::new(s()),
            vendor_fees: Accessor::new(s()),
            misc: Accessor::new(s()),

            activity_logs: Accessor::new(s()),
            alerts: Accessor::new(s()),
            dashboards: Accessor::new(s()),

            advertisers: Accessor::new(s()),
            campaigns: Accessor::new(s()),
            events: Accessor::new(s()),
            event_tags: Accessor::new(s()),
            line_items: Accessor::new(s()),
            line_item_flights: Accessor::new(s()),

            segments: Accessor::new(s()),
            segment_tags: Accessor::new(s()),
            segment_categories: Accessor::new(s()),
            segment_category_associations: Accessor::new(s()),
            segment_sharing: Accessor::new(s()),
            segment_category_sharing: Accessor::new(s()),
            segment_lookups: Accessor::new(s()),
            segment_category_lookups: Accessor::new(s()),
            segment_uploads: Accessor::new(s()),
            segment_updates: Accessor::new(s()),

            session,
        }
    }

    /// Wire the accessors and log in straight away when either credential
    /// is given; missing halves come from the session's credential provider.
    ///
    /// With neither credential the facade is returned unauthenticated; the
    /// first failing call will log in through the provider.
    pub async fn connect(
        session: Arc<Session>,
        username: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<Self, Error> {
        if username.is_some() || password.is_some() {
            session.authenticate(username, password).await?;
        }
        Ok(Self::new(session))
    }

    /// Log the shared session in as a different user. Every accessor
    /// follows, since they all share the session's cookies.
    pub async fn change_user(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Value, Error> {
        self.session
            .authenticate(Some(username), Some(password))
            .await
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}
