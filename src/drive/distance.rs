//! Distance drive collaborator.

use embedded_hal::delay::DelayNs;
use tracing::info;

use crate::config::units::{Centimeters, Rpm};
use crate::error::Result;
use crate::motor::SmartMotor;

use super::drivebase::Drivebase;

/// Drives the robot straight for a travel distance.
///
/// Implementations return once the drive has completed. A negative distance
/// drives backwards.
pub trait DistanceDrive {
    /// Drive `distance` at `speed` and wait for completion.
    fn drive_for_distance(&mut self, distance: Centimeters, speed: Rpm) -> Result<()>;
}

impl<T: DistanceDrive + ?Sized> DistanceDrive for &mut T {
    fn drive_for_distance(&mut self, distance: Centimeters, speed: Rpm) -> Result<()> {
        T::drive_for_distance(self, distance, speed)
    }
}

impl<L, R, D> DistanceDrive for Drivebase<L, R, D>
where
    L: SmartMotor,
    R: SmartMotor,
    D: DelayNs,
{
    /// Converts the distance to encoder units from the wheel geometry, tares
    /// both encoders and runs a straight relative move.
    fn drive_for_distance(&mut self, distance: Centimeters, speed: Rpm) -> Result<()> {
        let units = self.wheels().encoder_units_for(distance, self.left_config());

        if self.debug() {
            info!(
                distance_cm = distance.0,
                rpm = speed.0,
                units,
                "driving for distance"
            );
        }

        self.tare()?;
        self.drive_relative(units, speed)?;
        Ok(())
    }
}
