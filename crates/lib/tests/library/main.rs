mod common;
mod page_tests;
mod session_tests;
