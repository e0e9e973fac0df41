//! Declarative infrastructure for the users service
//!
//! The stack is described as plain data, checked, and rendered into a
//! CloudFormation template. Deployment is left to the CloudFormation tooling.

mod resources;
mod stack;
mod template;

pub use resources::{
    AttributeType, BillingMode, DeadLetterSpec, IndexSpec, KeySpec, OutputSpec, OutputValue,
    Projection, QueueEncryption, QueueSpec, RemovalPolicy, Resource, TableEncryption, TableSpec,
    Tags,
};
pub use stack::{StackDefinition, users_service_stack};
pub use template::{Template, synthesize};
