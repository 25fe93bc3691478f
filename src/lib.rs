mod address;
mod postcode;
mod record;
mod roman;
mod titlecase;

pub use address::format_address;
pub use postcode::{format_postcode, is_valid_postcode, PostcodeOptions};
pub use record::Address;
pub use titlecase::to_title_case;
