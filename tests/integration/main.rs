mod export_test;
mod session_test;
