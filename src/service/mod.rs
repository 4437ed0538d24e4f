pub mod economic;
pub mod platforms;
pub mod rate;

pub use economic::EconomicService;
pub use platforms::PlatformsService;
pub use rate::RateService;
