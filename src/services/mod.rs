pub mod geocoding;
pub mod openweather;
pub mod shipments;
pub mod weather;
