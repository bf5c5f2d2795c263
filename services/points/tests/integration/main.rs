mod apply_token_test;
mod helpers;
mod history_test;
mod router_test;
