use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical date representation used in stored records and dirty
/// comparison, matching the dd/mm/yyyy format the app displays.
pub const DATE_FMT: &str = "%d/%m/%Y";

/// Accepts an HTTPS image URL or an inline base64 data URI.
pub static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https://.*\.(png|jpg|jpeg|gif|webp))|^data:image/[a-zA-Z]+;base64,")
        .expect("invalid image URL pattern")
});

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));
