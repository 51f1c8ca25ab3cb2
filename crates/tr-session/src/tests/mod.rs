mod file_token_store;
mod session_error;
