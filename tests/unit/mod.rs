mod properties_tests;
mod script_tests;
