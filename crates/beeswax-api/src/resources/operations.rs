// Campaign operations: advertisers, campaigns, line items and flights,
// conversion events

use super::{Create, Delete, resource};

resource!(
    /// `advertiser`
    Advertiser => "advertiser", id: "advertiser_id"; Retrieve, List, Update
);

impl Create for Advertiser {
    const REQUIRED: &'static [&'static str] = &["advertiser_name", "conversion_method_id"];
}

impl Delete for Advertiser {}

resource!(
    /// `campaign`
    Campaign => "campaign", id: "campaign_id"; Retrieve, List, Update
);

impl Create for Campaign {
    const REQUIRED: &'static [&'static str] = &[
        "advertiser_id",
        "campaign_name",
        "campaign_budget",
        "budget_type",
        "start_date",
        "active",
    ];
}

impl Delete for Campaign {}

resource!(
    /// `event`: conversion events.
    Event => "event", id: "event_id"; Retrieve, List, Update
);

impl Create for Event {
    const REQUIRED: &'static [&'static str] = &["event_name", "advertiser_id", "value"];
}

impl Delete for Event {}

resource!(
    /// `event_tag`: pixel markup for a conversion event.
    EventTag => "event_tag", id: "event_id"; Retrieve, List
);

resource!(
    /// `line_item`
    LineItem => "line_item", id: "line_item_id"; Retrieve, List, Update
);

impl Create for LineItem {
    const REQUIRED: &'static [&'static str] = &[
        "advertiser_id",
        "line_item_type_id",
        "line_item_name",
        "line_item_budget",
        "budget_type",
        "bidding",
        "start_date",
        "active",
    ];
}

impl Delete for LineItem {}

resource!(
    /// `line_item_flight`: scheduled budget windows of a line item.
    LineItemFlight => "line_item_flight", id: "flight_id"; Retrieve, List, Update
);

impl Create for LineItemFlight {
    const REQUIRED: &'static [&'static str] = &["start_date", "line_item_id"];
}

impl Delete for LineItemFlight {}
