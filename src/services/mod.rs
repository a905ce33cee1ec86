//! Services module
//!
//! This module contains business logic services

pub mod housework;
pub mod month;
pub mod notification;
pub mod rent;
pub mod rotation;
pub mod settings;
pub mod splitbill;

// Re-export commonly used services
pub use housework::HouseworkService;
pub use month::MonthSheetService;
pub use notification::{NotificationService, SweepSummary};
pub use rent::RentService;
pub use rotation::{Rotation, RotationAction, RotationStrategy};
pub use settings::FeatureSettings;
pub use splitbill::SplitBillService;

use std::sync::Arc;
use teloxide::Bot;
use crate::config::settings::Settings;
use crate::sheets::{SheetsService, SpreadsheetClient};
use crate::utils::helpers::Clock;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub housework_service: HouseworkService,
    pub splitbill_service: SplitBillService,
    pub rent_service: RentService,
    pub month_service: MonthSheetService,
    pub notification_service: NotificationService,
    pub features: Arc<FeatureSettings>,
    pub clock: Clock,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: &Settings, client: Arc<dyn SpreadsheetClient>, clock: Clock) -> Self {
        let sheets = SheetsService::new(client);
        let features = Arc::new(FeatureSettings::new(settings.housework.reminders_enabled));

        let housework_service = HouseworkService::new(sheets.clone());
        let notification_service =
            NotificationService::new(bot, housework_service.clone(), features.clone(), clock);

        Self {
            housework_service,
            splitbill_service: SplitBillService::new(sheets.clone()),
            rent_service: RentService::new(sheets.clone()),
            month_service: MonthSheetService::new(sheets),
            notification_service,
            features,
            clock,
        }
    }
}
