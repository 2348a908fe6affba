pub mod device;
pub mod geolocation;
pub mod session;
pub mod strength;
pub mod validator;

pub use device::extract as extract_device_info;
pub use geolocation::{
    FixedPosition, GeolocationAcquirer, NoPositionSource, Position, PositionError,
    PositionOptions, PositionSource,
};
pub use session::{BusyFlag, RegistrationSession, SubmitError};
pub use strength::{strength, strength_label};
pub use validator::{validate, ValidationErrors};
