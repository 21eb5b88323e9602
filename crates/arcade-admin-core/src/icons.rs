//! Heroicons identifiers understood by the admin renderer

pub const USERS: &str = "UsersIcon";
pub const USER: &str = "UserIcon";
pub const USER_CIRCLE: &str = "UserCircleIcon";
pub const NEWSPAPER: &str = "NewspaperIcon";
pub const INBOX_STACK: &str = "InboxStackIcon";
pub const ROCKET_LAUNCH: &str = "RocketLaunchIcon";
pub const FIRE: &str = "FireIcon";
pub const CUBE: &str = "CubeIcon";
pub const CUBE_TRANSPARENT: &str = "CubeTransparentIcon";
pub const TAG: &str = "TagIcon";
pub const LINK: &str = "LinkIcon";
pub const SQUARE_2_STACK: &str = "Square2StackIcon";
pub const PHOTO: &str = "PhotoIcon";
pub const ENVELOPE: &str = "EnvelopeIcon";
pub const EYE: &str = "EyeIcon";
pub const CHECK: &str = "CheckIcon";
