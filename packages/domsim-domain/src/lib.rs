pub mod field;
pub mod markup;
pub mod record;

pub use field::{DOMAIN_ID_PATH, Field, FieldKind};
pub use markup::{Emphasis, flatten_for_export, strip_markup};
pub use record::DomainRecord;
