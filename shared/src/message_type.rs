use strum_macros::{AsRefStr, Display, EnumString};

/// Every envelope `type` the signaling channel carries. The relay only acts
/// on the two transmission toggles; the rest are forwarded opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MessageType {
    UserJoined,
    UserLeft,
    CreatorLeft,
    StartTransmitting,
    StopTransmitting,
    Offer,
    Answer,
    IceCandidate,
    Chat,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            "ice-candidate".parse::<MessageType>().unwrap(),
            MessageType::IceCandidate
        );
        assert_eq!(
            "start-transmitting".parse::<MessageType>().unwrap(),
            MessageType::StartTransmitting
        );
        assert_eq!("chat".parse::<MessageType>().unwrap(), MessageType::Chat);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("shout".parse::<MessageType>().is_err());
    }

    #[test]
    fn round_trips_through_display() {
        assert_eq!(MessageType::StopTransmitting.to_string(), "stop-transmitting");
        assert_eq!(MessageType::UserJoined.as_ref(), "user-joined");
    }
}
