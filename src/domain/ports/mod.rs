mod city_store;
mod navigator;
mod reverse_geocoder;

pub use city_store::CityStore;
pub use navigator::Navigator;
pub use reverse_geocoder::ReverseGeocoder;
