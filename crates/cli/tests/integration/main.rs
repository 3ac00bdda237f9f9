mod cart_tests;
mod common;
mod page_tests;
