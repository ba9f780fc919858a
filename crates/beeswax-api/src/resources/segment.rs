// Audience segments: definitions, categories, sharing, lookups and
// user-data uploads

use super::{Create, Delete, resource};

resource!(
    /// `segment`
    Segment => "segment", id: "segment_id"; Retrieve, List, Update
);

impl Create for Segment {
    const REQUIRED: &'static [&'static str] = &["segment_name"];
}

resource!(
    /// `segment_tag`: pixel markup for a segment.
    SegmentTag => "segment_tag", id: "segment_tag"; Retrieve, List
);

resource!(
    /// `segment_category`
    SegmentCategory => "segment_category", id: "segment_category_id"; Retrieve, List, Update
);

impl Create for SegmentCategory {
    const REQUIRED: &'static [&'static str] = &["segment_category_name"];
}

impl Delete for SegmentCategory {}

resource!(
    /// `segment_category_association`
    SegmentCategoryAssociation => "segment_category_association",
        id: "segment_category_association_id"; Retrieve, List
);

impl Create for SegmentCategoryAssociation {
    const REQUIRED: &'static [&'static str] = &["segment_category_key", "segment_key"];
}

impl Delete for SegmentCategoryAssociation {}

resource!(
    /// `segment_sharing`
    SegmentSharing => "segment_sharing", id: "segment_sharing_id"; Retrieve, List, Update
);

impl Create for SegmentSharing {
    const REQUIRED: &'static [&'static str] = &["segment_key", "shared_account_id"];
}

resource!(
    /// `segment_category_sharing`
    SegmentCategorySharing => "segment_category_sharing",
        id: "segment_category_sharing_id"; Retrieve, List, Update
);

impl Create for SegmentCategorySharing {
    const REQUIRED: &'static [&'static str] = &["segment_category_key", "shared_account_id"];
}

resource!(
    /// `segment_lookup`
    SegmentLookup => "segment_lookup", id: "segment_id"; Retrieve, List
);

resource!(
    /// `segment_category_lookup`
    SegmentCategoryLookup => "segment_category_lookup", id: "segment_category_id"; Retrieve, List
);

resource!(
    /// `segment_upload`: bulk user-to-segment files.
    ///
    /// `create` alone suffices when the body names files already staged
    /// (`segment_file_list`); `upload` sends a local file.
    SegmentUpload => "segment_upload", id: "segment_upload_id"; Retrieve, List, Upload
);

impl Create for SegmentUpload {
    const REQUIRED: &'static [&'static str] = &["user_id_type"];
}

resource!(
    /// `segment_update`: real-time user-to-segment assignment.
    SegmentUpdate => "segment_update"
);

impl Create for SegmentUpdate {
    const REQUIRED: &'static [&'static str] = &["user_data"];
}
