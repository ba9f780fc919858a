// Creative resources
//
// Creatives, their assets and templates, approval queues, and the
// creative-to-line-item association.

use super::{Create, Delete, resource};

resource!(
    /// `creative`
    Creative => "creative", id: "creative_id"; Retrieve, List, Update
);

impl Create for Creative {
    const REQUIRED: &'static [&'static str] = &[
        "advertiser_id",
        "creative_name",
        "creative_type",
        "secure",
        "creative_template_id",
        "active",
    ];
}

impl Delete for Creative {}

resource!(
    /// `creative_addon`: snippets attached to creatives at serve time.
    CreativeAddon => "creative_addon", id: "creative_addon_id"
);

impl Create for CreativeAddon {
    const REQUIRED: &'static [&'static str] = &[
        "creative_addon_name",
        "is_global",
        "active",
        "creative_addon_type",
        "creative_addon_content",
    ];
    const RENAMES: &'static [(&'static str, &'static str)] = &[("is_global", "global")];
}

resource!(
    /// `creative_approval_queue`
    CreativeApproval => "creative_approval_queue", id: "creative_approval_id"; Retrieve, List
);

resource!(
    /// `creative_approval_queue_history`
    CreativeApprovalHistory => "creative_approval_queue_history",
        id: "creative_approval_queue_history_id"; Retrieve, List
);

resource!(
    /// `creative_asset`: images and other files referenced by creatives.
    CreativeAsset => "creative_asset", id: "creative_asset_id"; Retrieve, List
);

impl Create for CreativeAsset {
    const REQUIRED: &'static [&'static str] = &["creative_asset_name", "size_in_bytes", "active"];
}

resource!(
    /// `video_asset`: video creative assets, transcoded on upload.
    VideoAsset => "video_asset", id: "creative_asset_id"
);

impl Create for VideoAsset {
    const REQUIRED: &'static [&'static str] = &[
        "advertiser_id",
        "creative_asset_name",
        "size_in_bytes",
        "active",
        "video_encoding_profile",
    ];
}

resource!(
    /// `creative_bulk_upload`: spreadsheet-driven creative creation.
    CreativeBulkUpload => "creative_bulk_upload", id: "cbu_id"; Retrieve, List, Upload
);

impl Create for CreativeBulkUpload {
    const REQUIRED: &'static [&'static str] =
        &["advertiser_id", "size_in_bytes", "active", "bulk_type"];
}

resource!(
    /// `creative_line_item`: which creatives serve on which line items.
    CreativeLineItem => "creative_line_item", id: "cli_id"; Retrieve, List, Update
);

impl Create for CreativeLineItem {
    const REQUIRED: &'static [&'static str] = &["creative_id", "line_item_id", "active"];
}

resource!(
    /// `creative_template`
    CreativeTemplate => "creative_template", id: "creative_template_id"; Retrieve, List, Update
);

impl Create for CreativeTemplate {
    const REQUIRED: &'static [&'static str] = &[
        "creative_template_name",
        "is_global",
        "rendering_key",
        "creative_template_content",
        "active",
    ];
    const RENAMES: &'static [(&'static str, &'static str)] = &[("is_global", "global")];
}
