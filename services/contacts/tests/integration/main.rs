mod association_test;
mod conflict_test;
mod e2e_test;
mod helpers;
mod otp_test;
mod query_test;
mod user_test;
