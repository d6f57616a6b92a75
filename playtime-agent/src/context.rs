use crate::configuration::Configuration;
use crate::reference_time::ReferenceTimer;

#[derive(Clone)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub reference_timer: ReferenceTimer,
}

impl ApplicationContext {
	pub fn new(configuration: Configuration) -> ApplicationContext {
		Self {
			configuration,
			reference_timer: ReferenceTimer::default(),
		}
	}
}
