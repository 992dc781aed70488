#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::bind_interrupts;
use embassy_time::Timer;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod clock;
mod light_adc;
mod motor_pins;
mod radio_cc1101;

use clock::{to_embassy_duration, EmbassyClock};
use light_adc::LdrPair;
use motor_pins::HBridgePins;
use radio_cc1101::Cc1101Radio;
use vehicle_core::{scheduler, Clock, HBridge, Mailboxes, RadioService, VehicleContext, VehicleRole, XorShift32};

#[cfg(not(any(feature = "vehicle1", feature = "vehicle2")))]
compile_error!("Either feature \"vehicle1\" or \"vehicle2\" must be enabled.");
#[cfg(all(feature = "vehicle1", feature = "vehicle2"))]
compile_error!("Only one of \"vehicle1\" or \"vehicle2\" can be enabled at a time.");

#[cfg(feature = "vehicle1")]
const ROLE: VehicleRole = VehicleRole::Vehicle1;
#[cfg(feature = "vehicle2")]
const ROLE: VehicleRole = VehicleRole::Vehicle2;

/// rp2040 default system clock, per `embassy_rp::init`'s default config.
const SYS_CLK_HZ: u64 = 125_000_000;

/// `top` for a free-running PWM slice (divider left at its default 1.0x)
/// that yields `vehicle_core::config::PWM_PERIOD_US`: `period = (top + 1) /
/// sys_clk_hz`, so `top = sys_clk_hz * period_us / 1_000_000 - 1`.
const PWM_TOP: u16 = (SYS_CLK_HZ * vehicle_core::config::PWM_PERIOD_US as u64 / 1_000_000 - 1) as u16;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

static MAILBOXES: StaticCell<Mailboxes> = StaticCell::new();

struct StatusLeds<'a> {
    red: Output<'a>,
    green: Output<'a>,
}

impl<'a> vehicle_core::Leds for StatusLeds<'a> {
    fn set(&mut self, red: bool, green: bool) {
        self.red.set_level(red.into());
        self.green.set_level(green.into());
    }
}

#[embassy_executor::task]
async fn fsm_task(
    mailboxes: &'static Mailboxes,
    sensor: LdrPair<'static>,
    motors: HBridge<HBridgePins<'static>>,
    leds: StatusLeds<'static>,
    entropy_seed: u32,
) {
    let mut vehicle = VehicleContext::new(sensor, motors, leds, EmbassyClock, XorShift32::new(entropy_seed), mailboxes);
    loop {
        let start = EmbassyClock.now();
        vehicle.tick();
        match scheduler::pace(&EmbassyClock, start, vehicle_core::config::fsm_period()) {
            scheduler::Pace::SleepFor(d) => Timer::after(to_embassy_duration(d)).await,
            scheduler::Pace::YieldNow => embassy_futures::yield_now().await,
        }
    }
}

#[embassy_executor::task]
async fn radio_task(
    mailboxes: &'static Mailboxes,
    radio: Cc1101Radio<
        ExclusiveDevice<Spi<'static, SPI0, embassy_rp::spi::Async>, Output<'static>, embassy_time::Delay>,
        Input<'static>,
    >,
) {
    let mut service = RadioService::new(radio);
    loop {
        let start = EmbassyClock.now();
        service.tick(mailboxes);
        match scheduler::pace(&EmbassyClock, start, vehicle_core::config::radio_period()) {
            scheduler::Pace::SleepFor(d) => Timer::after(to_embassy_duration(d)).await,
            scheduler::Pace::YieldNow => embassy_futures::yield_now().await,
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    defmt::info!("booting vehicle control core");

    let mut entropy_adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let mut entropy_ch = AdcChannel::new_pin(p.PIN_28, Pull::None);
    let entropy_seed: u16 = embassy_futures::block_on(entropy_adc.read(&mut entropy_ch)).unwrap_or(1);

    let left_ch = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let right_ch = AdcChannel::new_pin(p.PIN_27, Pull::None);
    let left_gnd = Output::new(p.PIN_22, Level::Low);
    let right_gnd = Output::new(p.PIN_21, Level::Low);
    let sensor = LdrPair::new(entropy_adc, left_ch, right_ch, left_gnd, right_gnd);

    let in1 = Output::new(p.PIN_2, Level::Low);
    let in2 = Output::new(p.PIN_3, Level::Low);
    let in3 = Output::new(p.PIN_4, Level::Low);
    let in4 = Output::new(p.PIN_5, Level::Low);
    let mut pwm_cfg = PwmConfig::default();
    pwm_cfg.top = PWM_TOP;
    let pwm_left = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_6, pwm_cfg.clone());
    let pwm_right = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_7, pwm_cfg.clone());
    let motors = HBridge::new(HBridgePins::new(in1, in2, in3, in4, pwm_left, pwm_right, pwm_cfg.top));

    let leds = StatusLeds {
        red: Output::new(p.PIN_14, Level::Low),
        green: Output::new(p.PIN_15, Level::Low),
    };

    let mut spi_cfg = SpiConfig::default();
    spi_cfg.frequency = 4_000_000;
    let spi = Spi::new(
        p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, p.DMA_CH0, p.DMA_CH1, spi_cfg,
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let spi_dev = ExclusiveDevice::new(spi, cs, embassy_time::Delay).expect("exclusive SPI device");
    let packet_ready = Input::new(p.PIN_20, Pull::Down);
    let mut chip = cc1101::Cc1101::new(spi_dev).expect("cc1101 init");
    let (own_addr, _peer_addr) = ROLE.addresses();
    let _ = chip.reset();
    let _ = chip.to_rx();
    let radio = Cc1101Radio::new(chip, packet_ready, own_addr);

    let mailboxes: &'static Mailboxes = MAILBOXES.init(Mailboxes::new());

    spawner.must_spawn(fsm_task(mailboxes, sensor, motors, leds, entropy_seed as u32));
    spawner.must_spawn(radio_task(mailboxes, radio));

    loop {
        Timer::after_secs(5).await;
    }
}
