//! Holiday mode switch.

use crate::repo::settings_repo::{SettingsRepository, HOLIDAY_KEY};
use crate::service::error::ServiceResult;
use log::info;

pub struct HolidayService<S: SettingsRepository> {
    settings: S,
}

impl<S: SettingsRepository> HolidayService<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    /// Off unless explicitly enabled.
    pub fn is_enabled(&self) -> ServiceResult<bool> {
        Ok(self.settings.get_bool(HOLIDAY_KEY)?.unwrap_or(false))
    }

    pub fn set_enabled(&self, enabled: bool) -> ServiceResult<()> {
        self.settings.set_bool(HOLIDAY_KEY, enabled)?;
        info!("event=holiday_toggle module=service status=ok enabled={enabled}");
        Ok(())
    }
}
