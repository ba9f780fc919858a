// Account resources

use super::{Create, Delete, Update, resource};

resource!(
    /// `account`: the tenant accounts visible to the logged-in user.
    Account => "account", id: "account_id"; Retrieve, List, Update
);

impl Create for Account {
    const REQUIRED: &'static [&'static str] = &["account_name", "active"];
}

resource!(
    /// `account_alert`: per-account subscriptions to system alerts.
    AccountAlert => "account_alert", id: "account_alert_id"; Update
);

impl Create for AccountAlert {
    const REQUIRED: &'static [&'static str] = &["system_alert_key"];
}

impl Delete for AccountAlert {}

resource!(
    /// `account_setting`: key/value account settings.
    AccountSetting => "account_setting", id: "as_id"; Retrieve, List
);

impl Update for AccountSetting {
    const REQUIRED: &'static [&'static str] = &["account_setting", "value"];
}

impl Create for AccountSetting {
    const REQUIRED: &'static [&'static str] = &["account_setting", "value"];
}

impl Delete for AccountSetting {}
