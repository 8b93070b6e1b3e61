/// All database primary keys are PostgreSQL SERIAL/BIGSERIAL, read as `i64`.
pub type DbId = i64;
