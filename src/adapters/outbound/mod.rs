mod bigdatacloud_geocoder;
mod http_city_store;
mod tracing_navigator;

pub use bigdatacloud_geocoder::BigDataCloudGeocoder;
pub use http_city_store::HttpCityStore;
pub use tracing_navigator::TracingNavigator;
