// Targeting extensions, lists, reports, vendors and miscellaneous endpoints

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Accessor, Create, Delete, Resource, Retrieve, Update, resource};
use crate::error::Error;
use crate::params::Params;
use crate::session::RequestOptions;

resource!(
    /// `bid_modifier`
    BidModifier => "bid_modifier", id: "bid_modifier_id"; Retrieve, List
);

impl Update for BidModifier {
    const REQUIRED: &'static [&'static str] = &["active"];
}

impl Create for BidModifier {
    const REQUIRED: &'static [&'static str] = &["bid_modifier_name", "bid_modifier_terms", "active"];
}

impl Delete for BidModifier {}

resource!(
    /// `custom_list`: named lists of domains, apps, IPs and the like.
    CustomList => "custom_list", id: "list_id"; Retrieve, List, Update
);

impl Create for CustomList {
    const REQUIRED: &'static [&'static str] = &["list_name", "list_type"];
}

impl Delete for CustomList {
    const KEY: Option<&'static str> = Some("custom_list_id");
}

resource!(
    /// `list_item`: one entry of a custom list.
    ListItem => "list_item", id: "list_item_id"; Retrieve, List, Update
);

impl Create for ListItem {
    const REQUIRED: &'static [&'static str] = &["list_id", "list_item"];
}

impl Accessor<ListItem> {
    /// Remove `list_item_id` from the custom list `list_id`.
    pub async fn delete_item<T: DeserializeOwned>(
        &self,
        list_item_id: impl Into<Value>,
        list_id: impl Into<Value>,
    ) -> Result<T, Error> {
        let query = Params::new()
            .with("list_item_id", list_item_id)
            .with("list_id", list_id);
        self.request(Method::DELETE, &[ListItem::PATH], RequestOptions::query(query))
            .await
    }
}

resource!(
    /// `list_item_bulk_upload`: load list items from a file.
    ListItemBulkUpload => "list_item_bulk_upload"; Upload
);

impl Create for ListItemBulkUpload {
    const REQUIRED: &'static [&'static str] = &["list_id", "list_item"];
}

resource!(
    /// `native_offer`: lookups and updates name the offer's advertiser too.
    NativeOffer => "native_offer", id: "native_offer_id"
);

impl Retrieve for NativeOffer {
    const REQUIRED: &'static [&'static str] = &["advertiser_id", "native_offer_name"];
}

impl Update for NativeOffer {
    const REQUIRED: &'static [&'static str] = &["advertiser_id", "native_offer_name"];
}

impl Create for NativeOffer {
    const REQUIRED: &'static [&'static str] = &["advertiser_id", "native_offer_name"];
}

resource!(
    /// `push_queue`: pending pushes of objects to the bidders.
    PushQueue => "push_queue", id: "push_id"; Retrieve, List
);

resource!(
    /// `report_save`: saved report definitions.
    Report => "report_save", id: "report_save_id"; Retrieve, List, Update
);

impl Create for Report {
    const REQUIRED: &'static [&'static str] = &["report_name", "report_id"];
}

impl Delete for Report {}

resource!(
    /// `report_queue`: asynchronous report runs.
    ReportQueue => "report_queue", id: "report_queue_id"; Retrieve
);

impl Create for ReportQueue {
    const REQUIRED: &'static [&'static str] = &["report_id"];
}

resource!(
    /// `strategy`
    Strategy => "strategy", id: "strategy_id"; Retrieve, List
);

resource!(
    /// `targeting_template`
    TargetingTemplate => "targeting_template", id: "targeting_template_id"; Retrieve, List, Update
);

impl Create for TargetingTemplate {
    const REQUIRED: &'static [&'static str] = &["template_name"];
}

impl Delete for TargetingTemplate {}

resource!(
    /// `vendor`: third parties whose fees are passed through.
    Vendor => "vendor", id: "vendor_id"; Retrieve, List, Update
);

impl Create for Vendor {
    const REQUIRED: &'static [&'static str] = &["vendor_name"];
}

impl Delete for Vendor {}

resource!(
    /// `vendor_fee`: a vendor's fee attached to an advertiser, campaign or line item.
    VendorFee => "vendor_fee", id: "vendor_fee_id"; Retrieve, List, Update
);

impl Create for VendorFee {
    const REQUIRED: &'static [&'static str] = &["vendor_id", "object_id", "object_type"];
}

impl Delete for VendorFee {}

/// Endpoints with no shared path: each operation names its own.
pub enum Misc {}

impl Resource for Misc {
    const PATH: &'static str = "";
}

impl Accessor<Misc> {
    /// `POST resend_user_email` with `fields` (`user_id`, `email`) as body.
    pub async fn resend_user_email<T: DeserializeOwned>(&self, fields: Params) -> Result<T, Error> {
        self.request(Method::POST, &["resend_user_email"], RequestOptions::body(fields))
            .await
    }

    /// `GET search` by `object_id`, `object_type` or `object_name`.
    pub async fn search<T: DeserializeOwned>(&self, filters: Params) -> Result<T, Error> {
        self.request(Method::GET, &["search"], RequestOptions::query(filters))
            .await
    }

    /// `GET user_lookup`: the currently logged-in user.
    pub async fn user_lookup<T: DeserializeOwned>(&self) -> Result<T, Error> {
        self.request(Method::GET, &["user_lookup"], RequestOptions::default())
            .await
    }

    /// `GET view` for the named reporting view.
    pub async fn view<T: DeserializeOwned>(&self, view_name: &str, filters: Params) -> Result<T, Error> {
        let query = Params::new().with("view_name", view_name).merge_under(filters);
        self.request(Method::GET, &["view"], RequestOptions::query(query))
            .await
    }
}
