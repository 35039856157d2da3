pub mod password_column;
