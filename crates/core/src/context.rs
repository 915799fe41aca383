use crate::config::ValidationConfig;
use crate::lookups::Lookups;
use crate::status::StatusResolver;

/// Everything a validator consults besides the submission itself.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub lookups: &'a dyn Lookups,
    pub resolver: &'a dyn StatusResolver,
    pub config: &'a ValidationConfig,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        lookups: &'a dyn Lookups,
        resolver: &'a dyn StatusResolver,
        config: &'a ValidationConfig,
    ) -> Self {
        Self {
            lookups,
            resolver,
            config,
        }
    }
}
