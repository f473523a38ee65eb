//! UART transport on the ESP-IDF driver.
//!
//! Backs the terminal with a hardware UART, normally UART0 so the shell
//! shares the USB console connector. Pins for the console UART are already
//! routed by the bootloader; only the driver and line parameters are set up
//! here.

use esp_idf_svc::sys as esp_idf_sys;

use heapless::String;

use crate::terminal::Transport;

/// UART configuration for the terminal channel.
pub struct UartTransportConfig {
    pub baud_rate: u32,
    /// Driver receive buffer; must exceed the 128-byte hardware FIFO.
    pub rx_buffer_size: usize,
}

impl Default for UartTransportConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            rx_buffer_size: 256,
        }
    }
}

/// A [`Transport`] over an installed ESP-IDF UART driver.
pub struct UartTransport {
    port: esp_idf_sys::uart_port_t,
}

impl UartTransport {
    /// Install the UART driver on `port` and wrap it.
    pub fn install(
        port: esp_idf_sys::uart_port_t,
        config: &UartTransportConfig,
    ) -> Result<Self, esp_idf_sys::EspError> {
        let uart_config = esp_idf_sys::uart_config_t {
            baud_rate: config.baud_rate as i32,
            data_bits: esp_idf_sys::uart_word_length_t_UART_DATA_8_BITS,
            parity: esp_idf_sys::uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: esp_idf_sys::uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: esp_idf_sys::uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };

        unsafe {
            esp_idf_sys::esp!(esp_idf_sys::uart_param_config(port, &uart_config))?;
            esp_idf_sys::esp!(esp_idf_sys::uart_driver_install(
                port,
                config.rx_buffer_size as i32,
                0,
                0,
                core::ptr::null_mut(),
                0,
            ))?;
        }

        Ok(Self { port })
    }
}

impl Transport for UartTransport {
    fn byte_available(&mut self) -> bool {
        let mut pending: usize = 0;
        let err = unsafe { esp_idf_sys::uart_get_buffered_data_len(self.port, &mut pending) };
        err == esp_idf_sys::ESP_OK && pending > 0
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        unsafe {
            esp_idf_sys::uart_read_bytes(
                self.port,
                &mut byte as *mut u8 as *mut core::ffi::c_void,
                1,
                0,
            );
        }
        byte
    }

    fn write_byte(&mut self, byte: u8) {
        unsafe {
            esp_idf_sys::uart_write_bytes(
                self.port,
                &byte as *const u8 as *const core::ffi::c_void,
                1,
            );
        }
    }
}

/// Identification line for the startup sequence, derived from the factory
/// base MAC (the closest thing ESP-IDF has to a chip id).
pub fn chip_id_line() -> String<32> {
    use core::fmt::Write;

    let mut mac = [0u8; 6];
    unsafe {
        esp_idf_sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }

    let id = u32::from_be_bytes([mac[2], mac[3], mac[4], mac[5]]);

    let mut line = String::new();
    let _ = write!(line, "ChipID: {}", id);
    line
}
