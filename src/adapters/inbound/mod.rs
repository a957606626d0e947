mod url_position;

pub use url_position::UrlPosition;
