//! idlelink - Idle-timeout framed UART command firmware
//!
//! Main firmware binary for the STM32F4-Discovery board. A host sends short
//! ASCII commands over UART4 with no length prefix and no terminator; a
//! quiet line ends each command. The firmware toggles the green LED (PD12),
//! drives the two DAC channels (PA4, PA5) and acknowledges with `[DONE]`.
//!
//! Wiring:
//! - UART4 TX: PA0, RX: PA1 (8N1, baud rate from link.toml)
//! - LED: PD12
//! - DAC: PA4 (channel 1), PA5 (channel 2)
//! - ADC1: PA6 (IN6), PA7 (IN7)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::bind_interrupts;
use embassy_stm32::dac::Dac;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::peripherals::UART4;
use embassy_stm32::usart::{self, Uart};
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use idlelink_core::dispatch::{DispatchOutcome, Dispatcher};
use idlelink_core::link::{LinkStats, TransmitPath};
use idlelink_core::traits::{HalBridge, PeripheralBridge};
use idlelink_hal_stm32f4::{usart_config, Dac1Output, Dac2Output, PushPullPin};
use idlelink_protocol::PinId;

mod channels;
mod config;
mod tasks;

use crate::channels::{ANALOG_INPUTS, FRAME_MAILBOX, LINK_STATS, REPLY_QUEUE};
use crate::tasks::TICK_MS;

bind_interrupts!(struct Irqs {
    UART4 => usart::InterruptHandler<UART4>;
});

/// DMA ring for UART reception
const RX_RING_SIZE: usize = 256;

/// Main loop polling interval in milliseconds
const POLL_INTERVAL_MS: u64 = 1;

/// Heartbeat log interval in milliseconds
const HEARTBEAT_INTERVAL_MS: u32 = 1_000;

// DMA ring for the RX path (must live forever)
static RX_RING: StaticCell<[u8; RX_RING_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("idlelink firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let link = config::load_link_config();

    // UART4: PA0 = TX, PA1 = RX. TX on DMA1 stream 4, RX on DMA1 stream 2.
    let uart = Uart::new(
        p.UART4,
        p.PA1, // RX
        p.PA0, // TX
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH2,
        usart_config(&link.uart),
    )
    .unwrap();

    let (tx, rx) = uart.split();
    let rx = rx.into_ring_buffered(RX_RING.init([0; RX_RING_SIZE]));

    // Green LED, starts off
    let led = PushPullPin::new(Output::new(p.PD12, Level::Low, Speed::Low), false);

    // DAC1 channel 1 on PA4, channel 2 on PA5
    let (dac1, dac2) = Dac::new_blocking(p.DAC1, p.PA4, p.PA5).split();

    // ADC1 IN6 on PA6, IN7 on PA7
    let adc = Adc::new(p.ADC1);
    let in1 = p.PA6.degrade_adc();
    let in2 = p.PA7.degrade_adc();

    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::uart_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::uart_rx_task(rx, link.idle_timeout_us))
        .unwrap();
    spawner.spawn(tasks::adc_task(adc, in1, in2)).unwrap();
    info!("All tasks spawned");

    let bridge = HalBridge::new(
        PinId::PD12,
        led,
        Dac1Output::new(dac1),
        Dac2Output::new(dac2),
        &ANALOG_INPUTS,
    );
    let mut dispatcher = Dispatcher::new(bridge, TransmitPath::new(REPLY_QUEUE.sender()));

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut link_stats = LinkStats::default();
    let mut last_heartbeat = TICK_MS.load(Ordering::Relaxed);

    loop {
        match dispatcher.poll(&FRAME_MAILBOX).await {
            Ok(Some(DispatchOutcome::Executed(command))) => debug!("Executed {:?}", command),
            Ok(Some(DispatchOutcome::Unknown)) => debug!("Unknown frame ignored"),
            Ok(Some(DispatchOutcome::Rejected(e))) => warn!("Bad parameter: {:?}", e),
            Ok(None) => {}
            Err(e) => error!("Reply not sent: {:?}", e),
        }

        let now_ms = TICK_MS.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last_heartbeat) >= HEARTBEAT_INTERVAL_MS {
            last_heartbeat = now_ms;
            if let Some(stats) = LINK_STATS.try_take() {
                link_stats = stats;
            }
            let (a, b) = dispatcher.bridge_mut().read_analog_inputs();
            info!(
                "Heartbeat: t={}ms link={:?} dispatch={:?} adc=({}, {})",
                now_ms,
                link_stats,
                dispatcher.stats(),
                a,
                b
            );
        }

        ticker.next().await;
    }
}
