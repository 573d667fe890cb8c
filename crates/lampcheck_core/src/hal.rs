//! `Board` over embedded-hal 1.0 pins.
//!
//! Digital I/O and the blocking delay come straight from embedded-hal. The
//! analog sensors, the character display and the millisecond clock have no
//! embedded-hal trait, so they are expressed with the small traits below.

use std::fmt::Debug;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::board::{Board, Millis};
use crate::channel::CHANNEL_COUNT;
use crate::error::{CoreError, Result};
use crate::input::ButtonSample;

/// Free-running millisecond counter.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// One brightness sensor behind an ADC channel.
pub trait LightSensor {
    type Error: Debug;

    fn read(&mut self) -> core::result::Result<u16, Self::Error>;
}

/// Two-row character display.
pub trait TextDisplay {
    type Error: Debug;

    fn clear(&mut self) -> core::result::Result<(), Self::Error>;

    fn write_row(&mut self, row: u8, text: &str) -> core::result::Result<(), Self::Error>;
}

/// The three active-high button inputs.
pub struct Buttons<I> {
    pub start: I,
    pub resume: I,
    pub stop: I,
}

/// Discrete outputs besides the channel lights.
pub struct Outputs<O> {
    pub buzzer: O,
    pub display_power: O,
}

fn io_err<E: Debug>(component: &'static str) -> impl FnOnce(E) -> CoreError {
    move |e| CoreError::io(component, format!("{e:?}"))
}

pub struct HalBoard<C, I, O, S, D, Dl> {
    clock: C,
    buttons: Buttons<I>,
    lights: [O; CHANNEL_COUNT],
    sensors: [S; CHANNEL_COUNT],
    outputs: Outputs<O>,
    display: D,
    delay: Dl,
}

impl<C, I, O, S, D, Dl> HalBoard<C, I, O, S, D, Dl>
where
    C: Clock,
    I: InputPin,
    O: OutputPin,
    S: LightSensor,
    D: TextDisplay,
    Dl: DelayNs,
{
    pub fn new(
        clock: C,
        buttons: Buttons<I>,
        lights: [O; CHANNEL_COUNT],
        sensors: [S; CHANNEL_COUNT],
        outputs: Outputs<O>,
        display: D,
        delay: Dl,
    ) -> Self {
        Self {
            clock,
            buttons,
            lights,
            sensors,
            outputs,
            display,
            delay,
        }
    }

    pub fn lights(&self) -> &[O; CHANNEL_COUNT] {
        &self.lights
    }

    pub fn outputs(&self) -> &Outputs<O> {
        &self.outputs
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

fn drive<O: OutputPin>(pin: &mut O, on: bool, component: &'static str) -> Result<()> {
    if on {
        pin.set_high().map_err(io_err(component))
    } else {
        pin.set_low().map_err(io_err(component))
    }
}

impl<C, I, O, S, D, Dl> Board for HalBoard<C, I, O, S, D, Dl>
where
    C: Clock,
    I: InputPin,
    O: OutputPin,
    S: LightSensor,
    D: TextDisplay,
    Dl: DelayNs,
{
    fn now_ms(&self) -> Millis {
        self.clock.now_ms()
    }

    fn read_buttons(&mut self) -> Result<ButtonSample> {
        Ok(ButtonSample {
            start: self.buttons.start.is_high().map_err(io_err("start button"))?,
            resume: self.buttons.resume.is_high().map_err(io_err("resume button"))?,
            stop: self.buttons.stop.is_high().map_err(io_err("stop button"))?,
        })
    }

    fn read_sensor(&mut self, channel: usize) -> Result<u16> {
        self.sensors
            .get_mut(channel)
            .ok_or_else(|| CoreError::unknown_channel(channel))?
            .read()
            .map_err(io_err("light sensor"))
    }

    fn set_channel_output(&mut self, channel: usize, on: bool) -> Result<()> {
        let pin = self
            .lights
            .get_mut(channel)
            .ok_or_else(|| CoreError::unknown_channel(channel))?;
        drive(pin, on, "channel light")
    }

    fn set_buzzer(&mut self, on: bool) -> Result<()> {
        drive(&mut self.outputs.buzzer, on, "buzzer")
    }

    fn set_display_power(&mut self, on: bool) -> Result<()> {
        drive(&mut self.outputs.display_power, on, "display power")
    }

    fn display_clear(&mut self) -> Result<()> {
        self.display.clear().map_err(io_err("display"))
    }

    fn display_show(&mut self, first: &str, second: &str) -> Result<()> {
        self.display.clear().map_err(io_err("display"))?;
        self.display.write_row(0, first).map_err(io_err("display"))?;
        self.display.write_row(1, second).map_err(io_err("display"))
    }

    fn delay(&mut self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::digital::ErrorType;

    use crate::error::ErrorKind;

    struct FixedClock(Millis);

    impl Clock for FixedClock {
        fn now_ms(&self) -> Millis {
            self.0
        }
    }

    #[derive(Default)]
    struct FakeInput(bool);

    impl ErrorType for FakeInput {
        type Error = Infallible;
    }

    impl InputPin for FakeInput {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(self.0)
        }
        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[derive(Clone, Default)]
    struct FakeOutput(Rc<Cell<bool>>);

    impl ErrorType for FakeOutput {
        type Error = Infallible;
    }

    impl OutputPin for FakeOutput {
        fn set_low(&mut self) -> core::result::Result<(), Infallible> {
            self.0.set(false);
            Ok(())
        }
        fn set_high(&mut self) -> core::result::Result<(), Infallible> {
            self.0.set(true);
            Ok(())
        }
    }

    struct FakeSensor(core::result::Result<u16, &'static str>);

    impl LightSensor for FakeSensor {
        type Error = &'static str;

        fn read(&mut self) -> core::result::Result<u16, Self::Error> {
            self.0
        }
    }

    #[derive(Default)]
    struct FakeDisplay {
        rows: [String; 2],
        clears: usize,
    }

    impl TextDisplay for FakeDisplay {
        type Error = Infallible;

        fn clear(&mut self) -> core::result::Result<(), Infallible> {
            self.clears += 1;
            self.rows = Default::default();
            Ok(())
        }

        fn write_row(&mut self, row: u8, text: &str) -> core::result::Result<(), Infallible> {
            self.rows[row as usize] = text.to_string();
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeDelay(Rc<Cell<u64>>);

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.set(self.0.get() + u64::from(ns));
        }
    }

    type TestBoard =
        HalBoard<FixedClock, FakeInput, FakeOutput, FakeSensor, FakeDisplay, FakeDelay>;

    fn board(stop_pressed: bool, sensor: core::result::Result<u16, &'static str>) -> TestBoard {
        HalBoard::new(
            FixedClock(42),
            Buttons {
                start: FakeInput(false),
                resume: FakeInput(false),
                stop: FakeInput(stop_pressed),
            },
            Default::default(),
            [
                FakeSensor(sensor),
                FakeSensor(Ok(0)),
                FakeSensor(Ok(0)),
                FakeSensor(Ok(0)),
            ],
            Outputs {
                buzzer: FakeOutput::default(),
                display_power: FakeOutput::default(),
            },
            FakeDisplay::default(),
            FakeDelay::default(),
        )
    }

    #[test]
    fn buttons_are_sampled_active_high() {
        let mut b = board(true, Ok(0));
        assert_eq!(b.now_ms(), 42);
        let sample = b.read_buttons().unwrap();
        assert!(sample.stop);
        assert!(!sample.start);
        assert!(!sample.resume);
    }

    #[test]
    fn outputs_follow_requests() {
        let mut b = board(false, Ok(0));
        b.set_channel_output(2, true).unwrap();
        b.set_buzzer(true).unwrap();
        b.set_display_power(true).unwrap();

        assert!(b.lights()[2].0.get());
        assert!(!b.lights()[1].0.get());
        assert!(b.outputs().buzzer.0.get());
        assert!(b.outputs().display_power.0.get());

        b.set_buzzer(false).unwrap();
        assert!(!b.outputs().buzzer.0.get());
    }

    #[test]
    fn show_clears_then_writes_both_rows() {
        let mut b = board(false, Ok(0));
        b.display_show("Paused!", "Press play...").unwrap();
        assert_eq!(b.display().clears, 1);
        assert_eq!(b.display().rows, ["Paused!".to_string(), "Press play...".to_string()]);
    }

    #[test]
    fn sensor_failures_become_io_errors() {
        let mut b = board(false, Err("adc busy"));
        let err = b.read_sensor(0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(b.read_sensor(1).unwrap(), 0);
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let mut b = board(false, Ok(0));
        assert_eq!(
            b.set_channel_output(CHANNEL_COUNT, true).unwrap_err().kind,
            ErrorKind::InvalidArgument
        );
        assert!(b.read_sensor(7).is_err());
    }

    #[test]
    fn delay_is_forwarded_in_milliseconds() {
        let mut b = board(false, Ok(0));
        let spent = b.delay.0.clone();
        b.delay(Duration::from_millis(150));
        assert_eq!(spent.get(), 150_000_000);
    }
}
