// Monitoring resources: activity log, alerts, dashboards

use super::{Create, Delete, resource};

resource!(
    /// `activity_log`: audit trail of object changes.
    ActivityLog => "activity_log", id: "log_id"; Retrieve, List
);

resource!(
    /// `alert`
    Alert => "alert", id: "alert_id"; Retrieve, List, Update
);

impl Create for Alert {
    const REQUIRED: &'static [&'static str] = &["subject", "content", "from_address"];
}

impl Delete for Alert {}

resource!(
    /// `dashboard`: records are keyed by dashboard name.
    Dashboard => "dashboard", id: "dashboard"; Retrieve, List
);
