use crate::protocol::{self, DecodeError, PacketKind};
use crate::session::RaceState;
use log::trace;
use std::net::{ToSocketAddrs, UdpSocket};
use thiserror::Error;

const UDP_MAX: usize = 65535;

pub trait MessageHandler {
    fn session_update<M: MessageHandler>(&self, _client: &TelemetryClient<M>, total_laps: u8) {
        trace!(
            "Received session packet with a total lap count of {}",
            total_laps
        );
    }

    fn lap_data_update<M: MessageHandler>(&self, _client: &TelemetryClient<M>, current_lap: u8) {
        trace!("Received lap data packet with the player on lap {}", current_lap);
    }
}

/// A blocking client for the game's UDP telemetry broadcast.
///
/// The game pushes datagrams at whatever address is configured in its
/// telemetry settings; there is no handshake, so the client only binds a
/// listening socket and decodes what arrives.
pub struct TelemetryClient<H: MessageHandler> {
    socket: UdpSocket,
    state: RaceState,
    handler: H,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed decoding packet: {0}")]
    PacketDecodeError(#[from] DecodeError),
    #[error("Socket error: {0}")]
    SocketError(#[from] std::io::Error),
}

impl<H> TelemetryClient<H>
where
    H: MessageHandler,
{
    pub fn bind<A: ToSocketAddrs>(listen: A, handler: H) -> Result<Self, ClientError> {
        let socket = UdpSocket::bind(listen)?;

        Ok(Self {
            socket,
            state: RaceState::new(),
            handler,
        })
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    /// Receive and dispatch a single datagram, blocking until one arrives.
    pub fn poll(&mut self) -> Result<(), ClientError> {
        let mut buffer = vec![0u8; UDP_MAX];
        let size = self.socket.recv(&mut buffer)?;

        self.dispatch(&buffer[..size])
    }

    fn dispatch(&mut self, packet: &[u8]) -> Result<(), ClientError> {
        match protocol::classify(packet)? {
            Some(PacketKind::Session) => {
                let total_laps = protocol::total_laps(packet)?;
                self.state.set_total_laps(total_laps);
                self.handler.session_update(&self, total_laps);
            }
            Some(PacketKind::LapData) => {
                let current_lap = protocol::player_current_lap(packet)?;
                self.state.set_current_lap(current_lap);
                self.handler.lap_data_update(&self, current_lap);
            }
            None => {
                // Only two of the game's packet types are decoded, so most
                // datagrams land here.
                trace!("Discarding unrecognised datagram of {} bytes", packet.len());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        session_updates: RefCell<Vec<u8>>,
        lap_updates: RefCell<Vec<u8>>,
    }

    impl MessageHandler for Recorder {
        fn session_update<M: MessageHandler>(&self, _client: &TelemetryClient<M>, total_laps: u8) {
            self.session_updates.borrow_mut().push(total_laps);
        }

        fn lap_data_update<M: MessageHandler>(&self, _client: &TelemetryClient<M>, current_lap: u8) {
            self.lap_updates.borrow_mut().push(current_lap);
        }
    }

    fn client() -> TelemetryClient<Recorder> {
        TelemetryClient::bind("127.0.0.1:0", Recorder::default()).unwrap()
    }

    fn session_packet(total_laps: u8) -> Vec<u8> {
        let mut packet = vec![0u8; 149];
        packet[5] = 1;
        packet[26] = total_laps;
        packet
    }

    fn lap_data_packet(car_index: u8, current_lap: u8) -> Vec<u8> {
        let mut packet = vec![0u8; 843];
        packet[5] = 2;
        packet[22] = car_index;
        packet[23 + car_index as usize * 41 + 32] = current_lap;
        packet
    }

    #[test]
    fn dispatches_session_packets() {
        let mut client = client();
        client.dispatch(&session_packet(52)).unwrap();

        assert_eq!(*client.handler.session_updates.borrow(), vec![52]);
        assert_eq!(client.state().total_laps(), Some(52));
    }

    #[test]
    fn dispatches_lap_data_packets() {
        let mut client = client();
        client.dispatch(&lap_data_packet(4, 11)).unwrap();

        assert_eq!(*client.handler.lap_updates.borrow(), vec![11]);
        assert_eq!(client.state().current_lap(), Some(11));
    }

    #[test]
    fn ignores_unrecognised_datagrams() {
        let mut client = client();
        client.dispatch(&[0u8; 64]).unwrap();

        assert!(client.handler.session_updates.borrow().is_empty());
        assert!(client.handler.lap_updates.borrow().is_empty());
        assert!(client.state().total_laps().is_none());
    }

    #[test]
    fn corrupt_lap_data_surfaces_as_an_error() {
        let mut client = client();
        let mut packet = lap_data_packet(0, 1);
        packet[22] = 200;

        let res = client.dispatch(&packet);
        assert!(matches!(
            res,
            Err(ClientError::PacketDecodeError(
                DecodeError::LapRecordOutOfRange(200)
            ))
        ));
        assert!(client.state().current_lap().is_none());
    }
}
