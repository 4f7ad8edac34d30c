mod appointment_test;
mod catalog_test;
mod middleware_test;
mod test_utils;
