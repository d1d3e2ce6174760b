//! Wire format for calendar dates (`2025-12-31`).

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");
