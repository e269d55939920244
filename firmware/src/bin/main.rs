#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::{Delay, Ticker};
use flight_core::{MissionSequencer, Vehicle};
use flight_firmware::config::{MISSION_REQUEST, STATS_PERIOD};
use flight_firmware::{
    telemetry_parser, Actuation, AltitudeCommand, AltitudeLink, CameraModePin, KillSwitch, Port,
    PositionCommand, PositionLink, PushButton, Receiver, SharedMutex, StatusLed, TelemetryState,
    UartEncoderOutput, UartTelemetryInput, CHUNK_LEN, TELEMETRY_BAUDRATE,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// Executor for telemetry reception, preempting the thread-mode tasks.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Reception buffers, alternating between the UART and the parser.
static CHUNK_A: StaticCell<[u8; CHUNK_LEN]> = StaticCell::new();
static CHUNK_B: StaticCell<[u8; CHUNK_LEN]> = StaticCell::new();

static RECEIVER: StaticCell<Receiver> = StaticCell::new();
static TELEMETRY: StaticCell<TelemetryState> = StaticCell::new();
static PORT: StaticCell<Port> = StaticCell::new();

/// Latest actuation command, with the emergency latch.
static ACTUATION: StaticCell<Actuation> = StaticCell::new();

static ALTITUDE_LINK: StaticCell<AltitudeLink> = StaticCell::new();
static POSITION_LINK: StaticCell<PositionLink> = StaticCell::new();

type Sequencer = MissionSequencer<
    'static,
    SharedMutex,
    Delay,
    &'static Actuation,
    &'static AltitudeLink,
    &'static PositionLink,
    CameraModePin<Output<'static>>,
    StatusLed<Output<'static>>,
>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("flight firmware starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let receiver: &'static Receiver = RECEIVER.init(Receiver::new());
    let telemetry: &'static TelemetryState = TELEMETRY.init(TelemetryState::new());
    let port: &'static Port = PORT.init(Port::new());
    let actuation: &'static Actuation = ACTUATION.init(Actuation::new());
    let altitude_link: &'static AltitudeLink = ALTITUDE_LINK.init(AltitudeLink::new());
    let position_link: &'static PositionLink = POSITION_LINK.init(PositionLink::new());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = TELEMETRY_BAUDRATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // --- Telemetry reception at interrupt priority ---
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    let buffers = [CHUNK_A.init([0; CHUNK_LEN]), CHUNK_B.init([0; CHUNK_LEN])];
    high.spawn(unwrap!(telemetry_task(
        UartTelemetryInput::new(rx, receiver),
        buffers
    )));

    // --- Board I/O ---
    let camera = CameraModePin::new(Output::new(p.PIN_16, Level::Low));
    let led = StatusLed::new(Output::new(p.PIN_25, Level::Low));
    let mission_button = PushButton::new(Input::new(p.PIN_14, Pull::Up));
    let start_button = PushButton::new(Input::new(p.PIN_15, Pull::Up));
    let kill_switch = KillSwitch::new(Input::new(p.PIN_13, Pull::Up));

    let sequencer = MissionSequencer::new(
        port,
        telemetry,
        Delay,
        Vehicle {
            actuation,
            altitude: altitude_link,
            position: position_link,
            camera,
            indicator: led,
        },
    );

    spawner.spawn(unwrap!(parser_task(receiver, telemetry)));
    spawner.spawn(unwrap!(output_task(UartEncoderOutput::new(tx), actuation)));
    spawner.spawn(unwrap!(kill_switch_task(kill_switch, actuation)));
    spawner.spawn(unwrap!(button_task(mission_button, start_button, port)));
    spawner.spawn(unwrap!(altitude_task(altitude_link)));
    spawner.spawn(unwrap!(position_task(position_link)));
    spawner.spawn(unwrap!(mission_task(sequencer)));

    info!("flight firmware initialized, waiting for telemetry...");
}

/// Telemetry task - keeps a UART read outstanding on alternating buffers.
#[embassy_executor::task]
async fn telemetry_task(
    mut input: UartTelemetryInput<'static>,
    buffers: [&'static mut [u8; CHUNK_LEN]; 2],
) {
    input.run(buffers).await
}

/// Parser task - decodes one completed chunk per wake into the telemetry state.
#[embassy_executor::task]
async fn parser_task(receiver: &'static Receiver, telemetry: &'static TelemetryState) {
    let mut parser = telemetry_parser();
    let mut ticker = Ticker::every(STATS_PERIOD);

    loop {
        match select(receiver.process_next(&mut parser, telemetry), ticker.next()).await {
            Either::First(_) => {}
            Either::Second(()) => {
                info!(
                    "telemetry: {:?}, overruns {}",
                    parser.stats(),
                    receiver.overruns()
                );
            }
        }
    }
}

/// Output task - encodes the latest actuation command for the stick encoder.
#[embassy_executor::task]
async fn output_task(mut output: UartEncoderOutput<'static>, actuation: &'static Actuation) {
    output.run(actuation).await
}

/// Kill-switch task - latches the emergency command while the switch is held.
#[embassy_executor::task]
async fn kill_switch_task(mut switch: KillSwitch<Input<'static>>, actuation: &'static Actuation) {
    switch.run(actuation).await
}

/// Button task - submits the configured mission and confirms take-off.
#[embassy_executor::task]
async fn button_task(
    mut mission: PushButton<Input<'static>>,
    mut start: PushButton<Input<'static>>,
    port: &'static Port,
) {
    loop {
        match select(mission.pressed(), start.pressed()).await {
            Either::First(()) => {
                info!("mission {} requested", MISSION_REQUEST.mission.0);
                port.submit(MISSION_REQUEST);
            }
            Either::Second(()) => port.confirm_start(),
        }
    }
}

/// Altitude controller task - receives commands meant for the altitude PID loop.
#[embassy_executor::task]
async fn altitude_task(link: &'static AltitudeLink) {
    loop {
        match link.receive().await {
            AltitudeCommand::Start { target_height } => info!("altitude hold at {}", target_height),
            command => info!("altitude controller: {:?}", command),
        }
    }
}

/// Position controller task - receives commands meant for the camera position loop.
#[embassy_executor::task]
async fn position_task(link: &'static PositionLink) {
    loop {
        match link.receive().await {
            PositionCommand::Target(target) => info!("position target {}, {}", target.x, target.y),
            command => info!("position controller: {:?}", command),
        }
    }
}

/// Mission task - runs mission scripts for as long as the board is powered.
#[embassy_executor::task]
async fn mission_task(mut sequencer: Sequencer) {
    sequencer.run().await
}
