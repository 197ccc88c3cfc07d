//! On-screen notification icons
//!
//! The console accepts a small integer selecting the icon shown next to a
//! notification. The set is closed; ids outside it are rejected before a
//! command is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use xbdm_core::{XbdmError, XbdmResult};

/// Notification icon selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum NotifyLogo {
    #[default]
    XboxLogo = 0,
    NewMessageLogo = 1,
    FriendRequestLogo = 2,
    NewMessage = 3,
    FlashingXboxLogo = 4,
    GamertagSentYouAMessage = 5,
    GamertagSignedOut = 6,
    GamertagSignedIn = 7,
    GamertagSignedIntoXboxLive = 8,
    GamertagSignedInOffline = 9,
    GamertagWantsToChat = 10,
    DisconnectedFromXboxLive = 11,
    Download = 12,
    FlashingMusicSymbol = 13,
    FlashingHappyFace = 14,
    FlashingFrowningFace = 15,
    FlashingDoubleSidedHammer = 16,
    GamertagWantsToChat2 = 17,
    PleaseReinsertMemoryUnit = 18,
    PleaseReconnectController = 19,
    GamertagHasJoinedChat = 20,
    GamertagHasLeftChat = 21,
    GameInviteSent = 22,
    FlashLogo = 23,
    PageSentTo = 24,
    Four2 = 25,
    Four3 = 26,
    AchievementUnlocked = 27,
    Four9 = 28,
    GamertagWantsToTalkInVideoKinect = 29,
    VideoChatInviteSent = 30,
    ReadyToPlay = 31,
    CantDownloadX = 32,
    DownloadStoppedForX = 33,
    FlashingXboxConsole = 34,
    XSentYouAGameMessage = 35,
    DeviceFull = 36,
    Four7 = 37,
    FlashingChatIcon = 38,
    AchievementsUnlocked = 39,
    XHasSentYouANudge = 40,
    MessengerDisconnected = 41,
    Blank = 42,
    CantSignInMessenger = 43,
    MissedMessengerConversation = 44,
    FamilyTimerXTimeRemaining = 45,
    DisconnectedXboxLive11MinutesRemaining = 46,
    KinectHealthEffects = 47,
    Four5 = 48,
    GamertagWantsYouToJoinAnXboxLiveParty = 49,
    PartyInviteSent = 50,
    GameInviteSentToXboxLiveParty = 51,
    KickedFromXboxLiveParty = 52,
    Nulled = 53,
    DisconnectedXboxLiveParty = 54,
    Downloaded = 55,
    CantConnectXblParty = 56,
    GamertagHasJoinedXblParty = 57,
    GamertagHasLeftXblParty = 58,
    GamerPictureUnlocked = 59,
    AvatarAwardUnlocked = 60,
    JoinedXblParty = 61,
    PleaseReinsertUsbStorageDevice = 62,
    PlayerMuted = 63,
    PlayerUnmuted = 64,
    FlashingChatSymbol = 65,
    Updating = 66,
}

/// Number of icons the console knows about
pub const NOTIFY_LOGO_COUNT: usize = 67;

const LOGOS: [NotifyLogo; NOTIFY_LOGO_COUNT] = [
    NotifyLogo::XboxLogo,
    NotifyLogo::NewMessageLogo,
    NotifyLogo::FriendRequestLogo,
    NotifyLogo::NewMessage,
    NotifyLogo::FlashingXboxLogo,
    NotifyLogo::GamertagSentYouAMessage,
    NotifyLogo::GamertagSignedOut,
    NotifyLogo::GamertagSignedIn,
    NotifyLogo::GamertagSignedIntoXboxLive,
    NotifyLogo::GamertagSignedInOffline,
    NotifyLogo::GamertagWantsToChat,
    NotifyLogo::DisconnectedFromXboxLive,
    NotifyLogo::Download,
    NotifyLogo::FlashingMusicSymbol,
    NotifyLogo::FlashingHappyFace,
    NotifyLogo::FlashingFrowningFace,
    NotifyLogo::FlashingDoubleSidedHammer,
    NotifyLogo::GamertagWantsToChat2,
    NotifyLogo::PleaseReinsertMemoryUnit,
    NotifyLogo::PleaseReconnectController,
    NotifyLogo::GamertagHasJoinedChat,
    NotifyLogo::GamertagHasLeftChat,
    NotifyLogo::GameInviteSent,
    NotifyLogo::FlashLogo,
    NotifyLogo::PageSentTo,
    NotifyLogo::Four2,
    NotifyLogo::Four3,
    NotifyLogo::AchievementUnlocked,
    NotifyLogo::Four9,
    NotifyLogo::GamertagWantsToTalkInVideoKinect,
    NotifyLogo::VideoChatInviteSent,
    NotifyLogo::ReadyToPlay,
    NotifyLogo::CantDownloadX,
    NotifyLogo::DownloadStoppedForX,
    NotifyLogo::FlashingXboxConsole,
    NotifyLogo::XSentYouAGameMessage,
    NotifyLogo::DeviceFull,
    NotifyLogo::Four7,
    NotifyLogo::FlashingChatIcon,
    NotifyLogo::AchievementsUnlocked,
    NotifyLogo::XHasSentYouANudge,
    NotifyLogo::MessengerDisconnected,
    NotifyLogo::Blank,
    NotifyLogo::CantSignInMessenger,
    NotifyLogo::MissedMessengerConversation,
    NotifyLogo::FamilyTimerXTimeRemaining,
    NotifyLogo::DisconnectedXboxLive11MinutesRemaining,
    NotifyLogo::KinectHealthEffects,
    NotifyLogo::Four5,
    NotifyLogo::GamertagWantsYouToJoinAnXboxLiveParty,
    NotifyLogo::PartyInviteSent,
    NotifyLogo::GameInviteSentToXboxLiveParty,
    NotifyLogo::KickedFromXboxLiveParty,
    NotifyLogo::Nulled,
    NotifyLogo::DisconnectedXboxLiveParty,
    NotifyLogo::Downloaded,
    NotifyLogo::CantConnectXblParty,
    NotifyLogo::GamertagHasJoinedXblParty,
    NotifyLogo::GamertagHasLeftXblParty,
    NotifyLogo::GamerPictureUnlocked,
    NotifyLogo::AvatarAwardUnlocked,
    NotifyLogo::JoinedXblParty,
    NotifyLogo::PleaseReinsertUsbStorageDevice,
    NotifyLogo::PlayerMuted,
    NotifyLogo::PlayerUnmuted,
    NotifyLogo::FlashingChatSymbol,
    NotifyLogo::Updating,
];

const LOGO_NAMES: [&str; NOTIFY_LOGO_COUNT] = [
    "XBOX_LOGO",
    "NEW_MESSAGE_LOGO",
    "FRIEND_REQUEST_LOGO",
    "NEW_MESSAGE",
    "FLASHING_XBOX_LOGO",
    "GAMERTAG_SENT_YOU_A_MESSAGE",
    "GAMERTAG_SIGNED_OUT",
    "GAMERTAG_SIGNED_IN",
    "GAMERTAG_SIGNED_INTO_XBOX_LIVE",
    "GAMERTAG_SIGNED_IN_OFFLINE",
    "GAMERTAG_WANTS_TO_CHAT",
    "DISCONNECTED_FROM_XBOX_LIVE",
    "DOWNLOAD",
    "FLASHING_MUSIC_SYMBOL",
    "FLASHING_HAPPY_FACE",
    "FLASHING_FROWNING_FACE",
    "FLASHING_DOUBLE_SIDED_HAMMER",
    "GAMERTAG_WANTS_TO_CHAT_2",
    "PLEASE_REINSERT_MEMORY_UNIT",
    "PLEASE_RECONNECT_CONTROLLER",
    "GAMERTAG_HAS_JOINED_CHAT",
    "GAMERTAG_HAS_LEFT_CHAT",
    "GAME_INVITE_SENT",
    "FLASH_LOGO",
    "PAGE_SENT_TO",
    "FOUR_2",
    "FOUR_3",
    "ACHIEVEMENT_UNLOCKED",
    "FOUR_9",
    "GAMERTAG_WANTS_TO_TALK_IN_VIDEO_KINECT",
    "VIDEO_CHAT_INVITE_SENT",
    "READY_TO_PLAY",
    "CANT_DOWNLOAD_X",
    "DOWNLOAD_STOPPED_FOR_X",
    "FLASHING_XBOX_CONSOLE",
    "X_SENT_YOU_A_GAME_MESSAGE",
    "DEVICE_FULL",
    "FOUR_7",
    "FLASHING_CHAT_ICON",
    "ACHIEVEMENTS_UNLOCKED",
    "X_HAS_SENT_YOU_A_NUDGE",
    "MESSENGER_DISCONNECTED",
    "BLANK",
    "CANT_SIGN_IN_MESSENGER",
    "MISSED_MESSENGER_CONVERSATION",
    "FAMILY_TIMER_X_TIME_REMAINING",
    "DISCONNECTED_XBOX_LIVE_11_MINUTES_REMAINING",
    "KINECT_HEALTH_EFFECTS",
    "FOUR_5",
    "GAMERTAG_WANTS_YOU_TO_JOIN_AN_XBOX_LIVE_PARTY",
    "PARTY_INVITE_SENT",
    "GAME_INVITE_SENT_TO_XBOX_LIVE_PARTY",
    "KICKED_FROM_XBOX_LIVE_PARTY",
    "NULLED",
    "DISCONNECTED_XBOX_LIVE_PARTY",
    "DOWNLOADED",
    "CANT_CONNECT_XBL_PARTY",
    "GAMERTAG_HAS_JOINED_XBL_PARTY",
    "GAMERTAG_HAS_LEFT_XBL_PARTY",
    "GAMER_PICTURE_UNLOCKED",
    "AVATAR_AWARD_UNLOCKED",
    "JOINED_XBL_PARTY",
    "PLEASE_REINSERT_USB_STORAGE_DEVICE",
    "PLAYER_MUTED",
    "PLAYER_UNMUTED",
    "FLASHING_CHAT_SYMBOL",
    "UPDATING",
];

impl NotifyLogo {
    /// All icons in id order
    pub fn all() -> &'static [NotifyLogo] {
        &LOGOS
    }

    /// Wire id of the icon
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Get an icon from its wire id
    pub fn from_id(id: u8) -> XbdmResult<Self> {
        LOGOS
            .get(usize::from(id))
            .copied()
            .ok_or_else(|| XbdmError::InvalidInput(format!("Invalid notification logo id: {}", id)))
    }

    /// Documentation name, e.g. `ACHIEVEMENT_UNLOCKED`
    pub fn name(&self) -> &'static str {
        LOGO_NAMES[usize::from(self.id())]
    }
}

impl TryFrom<u8> for NotifyLogo {
    type Error = XbdmError;

    fn try_from(id: u8) -> XbdmResult<Self> {
        Self::from_id(id)
    }
}

impl FromStr for NotifyLogo {
    type Err = XbdmError;

    /// Parse a documentation name (case-insensitive) or a numeric id
    fn from_str(s: &str) -> XbdmResult<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id);
        }
        LOGO_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|i| LOGOS[i])
            .ok_or_else(|| XbdmError::InvalidInput(format!("Unknown notification logo: {}", s)))
    }
}

impl fmt::Display for NotifyLogo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
