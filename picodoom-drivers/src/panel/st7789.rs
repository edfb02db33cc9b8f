//! ST7789 TFT controller over 4-wire SPI
//!
//! # Link protocol
//!
//! - D/C low: the byte on the bus is a command
//! - D/C high: bytes on the bus are parameters or pixel data
//! - CS is asserted around each command byte and around each contiguous
//!   data burst
//!
//! Window addressing is CASET (0x2A) and RASET (0x2B), each followed by
//! big-endian start and end coordinates, then RAMWR (0x2C). The controller
//! fills the window row-major from the pixel bytes that follow.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use picodoom_core::pixel::WireColor;
use picodoom_core::traits::{FrameTransport, Window};

/// ST7789 command bytes
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Sleep out
    pub const SLPOUT: u8 = 0x11;
    /// Normal display mode
    pub const NORON: u8 = 0x13;
    /// Display inversion on
    pub const INVON: u8 = 0x21;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Row address set
    pub const RASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory data access control (orientation)
    pub const MADCTL: u8 = 0x36;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
}

/// COLMOD parameter for 16 bits per pixel
const COLMOD_16BIT: u8 = 0x55;

/// Pixels per SPI write when filling
const FILL_CHUNK_PIXELS: usize = 64;

/// Controller settings applied during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// MADCTL orientation byte
    pub madctl: u8,
    /// Enable display inversion (most IPS panels need it)
    pub invert: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            madctl: 0x60,
            invert: true,
        }
    }
}

/// Panel link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// SPI transfer failed
    Bus,
    /// A control line could not be driven
    Pin,
}

/// ST7789 driver
///
/// Owns the SPI bus and the D/C, CS, reset and backlight lines.
pub struct St7789<SPI, DC, CS, RST, BL> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    bl: BL,
    config: PanelConfig,
}

impl<SPI, DC, CS, RST, BL> St7789<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Wrap the bus and pins; nothing is sent until [`init`](Self::init)
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, bl: BL, config: PanelConfig) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            bl,
            config,
        }
    }

    /// Reset the controller and bring it up in 16-bit color mode
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        self.cs.set_high().map_err(|_| PanelError::Pin)?;

        self.rst.set_high().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(5).await;
        self.rst.set_low().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(20).await;
        self.rst.set_high().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(150).await;

        self.command(cmd::SWRESET, &[]).await?;
        delay.delay_ms(150).await;

        self.command(cmd::SLPOUT, &[]).await?;
        delay.delay_ms(10).await;

        self.command(cmd::COLMOD, &[COLMOD_16BIT]).await?;
        self.command(cmd::MADCTL, &[self.config.madctl]).await?;
        if self.config.invert {
            self.command(cmd::INVON, &[]).await?;
        }

        self.command(cmd::NORON, &[]).await?;
        delay.delay_ms(10).await;

        self.command(cmd::DISPON, &[]).await?;
        delay.delay_ms(10).await;

        Ok(())
    }

    /// Backlight on for any non-zero level
    pub fn set_backlight(&mut self, level: u8) -> Result<(), PanelError> {
        let result = if level == 0 {
            self.bl.set_low()
        } else {
            self.bl.set_high()
        };
        result.map_err(|_| PanelError::Pin)
    }

    /// Send a command byte, then its parameters as a separate data burst
    pub async fn command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Pin)?;
        self.burst(&[command]).await?;

        if !params.is_empty() {
            self.dc.set_high().map_err(|_| PanelError::Pin)?;
            self.burst(params).await?;
        }
        Ok(())
    }

    /// One CS-framed data burst
    async fn data(&mut self, bytes: &[u8]) -> Result<(), PanelError> {
        self.dc.set_high().map_err(|_| PanelError::Pin)?;
        self.burst(bytes).await
    }

    async fn burst(&mut self, bytes: &[u8]) -> Result<(), PanelError> {
        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        let result = self.write_flushed(bytes).await;
        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }

    /// Write and wait until the last bit has left the shifter, so D/C and CS
    /// can change safely afterwards
    async fn write_flushed(&mut self, bytes: &[u8]) -> Result<(), PanelError> {
        self.spi.write(bytes).await.map_err(|_| PanelError::Bus)?;
        self.spi.flush().await.map_err(|_| PanelError::Bus)
    }

    async fn window(&mut self, window: Window) -> Result<(), PanelError> {
        let [x0h, x0l] = window.x0.to_be_bytes();
        let [x1h, x1l] = window.x1.to_be_bytes();
        let [y0h, y0l] = window.y0.to_be_bytes();
        let [y1h, y1l] = window.y1.to_be_bytes();

        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l]).await?;
        self.command(cmd::RASET, &[y0h, y0l, y1h, y1l]).await?;
        self.command(cmd::RAMWR, &[]).await
    }

    async fn fill_color(&mut self, color: WireColor, count: usize) -> Result<(), PanelError> {
        if count == 0 {
            return Ok(());
        }

        let mut chunk = [0u8; FILL_CHUNK_PIXELS * 2];
        for px in chunk.chunks_exact_mut(2) {
            px.copy_from_slice(&color.to_bytes());
        }

        self.dc.set_high().map_err(|_| PanelError::Pin)?;
        self.cs.set_low().map_err(|_| PanelError::Pin)?;

        let mut remaining = count;
        let mut result = Ok(());
        while remaining > 0 {
            let pixels = remaining.min(FILL_CHUNK_PIXELS);
            if let Err(e) = self.spi.write(&chunk[..pixels * 2]).await {
                result = Err(e);
                break;
            }
            remaining -= pixels;
        }
        let result = match result {
            Ok(()) => self.spi.flush().await,
            Err(e) => Err(e),
        };

        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result.map_err(|_| PanelError::Bus)
    }
}

impl<SPI, DC, CS, RST, BL> FrameTransport for St7789<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    type Error = PanelError;

    async fn set_window(&mut self, window: Window) -> Result<(), Self::Error> {
        self.window(window).await
    }

    async fn write_pixels(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.data(bytes).await
    }

    async fn fill(&mut self, color: WireColor, count: usize) -> Result<(), Self::Error> {
        self.fill_color(color, count).await
    }
}
