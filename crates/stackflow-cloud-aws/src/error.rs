//! AWS backend error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error(
        "No AWS region configured. Set AWS_REGION, add a region to ~/.aws/config, \
        or pass --region"
    )]
    MissingRegion,
}

pub type Result<T> = std::result::Result<T, AwsError>;
