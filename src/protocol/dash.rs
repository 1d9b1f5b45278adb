//! Field table of the simulator's "Dash" data-out format.
//!
//! The producer writes these fields back to back, little-endian, with an
//! undocumented 12-byte region after `num_cylinders`. The content of that
//! region is unknown and always discarded.

use std::sync::Arc;

use crate::types::{Schema, WireType};

/// Index of the first field that follows the pad region.
pub const PAD_INDEX: usize = 58;

/// Length in bytes of the pad region.
pub const PAD_LEN: usize = 12;

/// Expected byte offset of the pad region within a raw datagram.
pub const PAD_OFFSET: usize = 232;

macro_rules! dash_fields {
    ($($variant:ident => $name:literal : $wire:ident),* $(,)?) => {
        /// Fields of the Dash format, in wire order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $($variant),*
        }

        impl Field {
            /// Every field in wire order.
            pub const ALL: &'static [Field] = &[$(Field::$variant),*];

            /// Field name as it appears in decoded records.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Field::$variant => $name),*
                }
            }

            /// On-the-wire encoding of this field.
            pub const fn wire_type(self) -> WireType {
                match self {
                    $(Field::$variant => WireType::$wire),*
                }
            }
        }
    };
}

dash_fields! {
    IsRaceOn => "is_race_on": Int32,
    TimestampMs => "timestamp_ms": UInt32,
    EngineMaxRpm => "engine_max_rpm": Float32,
    EngineIdleRpm => "engine_idle_rpm": Float32,
    CurrentEngineRpm => "current_engine_rpm": Float32,
    AccelerationX => "acceleration_x": Float32,
    AccelerationY => "acceleration_y": Float32,
    AccelerationZ => "acceleration_z": Float32,
    VelocityX => "velocity_x": Float32,
    VelocityY => "velocity_y": Float32,
    VelocityZ => "velocity_z": Float32,
    AngularVelocityX => "angular_velocity_x": Float32,
    AngularVelocityY => "angular_velocity_y": Float32,
    AngularVelocityZ => "angular_velocity_z": Float32,
    Yaw => "yaw": Float32,
    Pitch => "pitch": Float32,
    Roll => "roll": Float32,
    NormalizedSuspensionTravelFrontLeft => "normalized_suspension_travel_front_left": Float32,
    NormalizedSuspensionTravelFrontRight => "normalized_suspension_travel_front_right": Float32,
    NormalizedSuspensionTravelRearLeft => "normalized_suspension_travel_rear_left": Float32,
    NormalizedSuspensionTravelRearRight => "normalized_suspension_travel_rear_right": Float32,
    TireSlipRatioFrontLeft => "tire_slip_ratio_front_left": Float32,
    TireSlipRatioFrontRight => "tire_slip_ratio_front_right": Float32,
    TireSlipRatioRearLeft => "tire_slip_ratio_rear_left": Float32,
    TireSlipRatioRearRight => "tire_slip_ratio_rear_right": Float32,
    WheelRotationSpeedFrontLeft => "wheel_rotation_speed_front_left": Float32,
    WheelRotationSpeedFrontRight => "wheel_rotation_speed_front_right": Float32,
    WheelRotationSpeedRearLeft => "wheel_rotation_speed_rear_left": Float32,
    WheelRotationSpeedRearRight => "wheel_rotation_speed_rear_right": Float32,
    WheelOnRumbleStripFrontLeft => "wheel_on_rumble_strip_front_left": Int32,
    WheelOnRumbleStripFrontRight => "wheel_on_rumble_strip_front_right": Int32,
    WheelOnRumbleStripRearLeft => "wheel_on_rumble_strip_rear_left": Int32,
    WheelOnRumbleStripRearRight => "wheel_on_rumble_strip_rear_right": Int32,
    WheelInPuddleDepthFrontLeft => "wheel_in_puddle_depth_front_left": Float32,
    WheelInPuddleDepthFrontRight => "wheel_in_puddle_depth_front_right": Float32,
    WheelInPuddleDepthRearLeft => "wheel_in_puddle_depth_rear_left": Float32,
    WheelInPuddleDepthRearRight => "wheel_in_puddle_depth_rear_right": Float32,
    SurfaceRumbleFrontLeft => "surface_rumble_front_left": Float32,
    SurfaceRumbleFrontRight => "surface_rumble_front_right": Float32,
    SurfaceRumbleRearLeft => "surface_rumble_rear_left": Float32,
    SurfaceRumbleRearRight => "surface_rumble_rear_right": Float32,
    TireSlipAngleFrontLeft => "tire_slip_angle_front_left": Float32,
    TireSlipAngleFrontRight => "tire_slip_angle_front_right": Float32,
    TireSlipAngleRearLeft => "tire_slip_angle_rear_left": Float32,
    TireSlipAngleRearRight => "tire_slip_angle_rear_right": Float32,
    TireCombinedSlipFrontLeft => "tire_combined_slip_front_left": Float32,
    TireCombinedSlipFrontRight => "tire_combined_slip_front_right": Float32,
    TireCombinedSlipRearLeft => "tire_combined_slip_rear_left": Float32,
    TireCombinedSlipRearRight => "tire_combined_slip_rear_right": Float32,
    SuspensionTravelMetersFrontLeft => "suspension_travel_meters_front_left": Float32,
    SuspensionTravelMetersFrontRight => "suspension_travel_meters_front_right": Float32,
    SuspensionTravelMetersRearLeft => "suspension_travel_meters_rear_left": Float32,
    SuspensionTravelMetersRearRight => "suspension_travel_meters_rear_right": Float32,
    CarOrdinal => "car_ordinal": Int32,
    CarClass => "car_class": Int32,
    CarPerformanceIndex => "car_performance_index": Int32,
    DrivetrainType => "drivetrain_type": Int32,
    NumCylinders => "num_cylinders": Int32,
    // 12 reserved bytes on the wire here
    PositionX => "position_x": Float32,
    PositionY => "position_y": Float32,
    PositionZ => "position_z": Float32,
    Speed => "speed": Float32,
    Power => "power": Float32,
    Torque => "torque": Float32,
    TireTempFrontLeft => "tire_temp_front_left": Float32,
    TireTempFrontRight => "tire_temp_front_right": Float32,
    TireTempRearLeft => "tire_temp_rear_left": Float32,
    TireTempRearRight => "tire_temp_rear_right": Float32,
    Boost => "boost": Float32,
    Fuel => "fuel": Float32,
    DistanceTraveled => "distance_traveled": Float32,
    BestLap => "best_lap": Float32,
    LastLap => "last_lap": Float32,
    CurrentLap => "current_lap": Float32,
    CurrentRaceTime => "current_race_time": Float32,
    LapNumber => "lap_number": UInt16,
    RacePosition => "race_position": UInt8,
    Accel => "accel": UInt8,
    Brake => "brake": UInt8,
    Clutch => "clutch": UInt8,
    HandBrake => "hand_brake": UInt8,
    Gear => "gear": UInt8,
    Steer => "steer": Int8,
    NormalizedDrivingLine => "normalized_driving_line": Int8,
    NormalizedAiBrakeDifference => "normalized_ai_brake_difference": Int8,
}

impl Field {
    /// Position of this field in the wire order.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Build the Dash schema.
///
/// # Errors
///
/// Returns a configuration error if the table no longer places the pad region
/// at [`PAD_OFFSET`], which happens when fields are added, removed or
/// reordered ahead of it.
pub fn dash_schema() -> crate::Result<Arc<Schema>> {
    let schema =
        Schema::new(Field::ALL.iter().map(|f| (f.name(), f.wire_type())), PAD_INDEX, PAD_LEN)?;

    if schema.pad_offset() != PAD_OFFSET {
        return Err(crate::TelemetryError::configuration(format!(
            "pad region computed at byte {}, expected {}",
            schema.pad_offset(),
            PAD_OFFSET
        )));
    }

    Ok(Arc::new(schema))
}
