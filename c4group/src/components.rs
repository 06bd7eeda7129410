//! Component filename globs and sort lists
//!
//! Entries inside a group are packed in a canonical order so the engine
//! can load them with minimal seeking. The pattern data mirrors OpenClonk's
//! component catalogue (`C4Components.h`); the lists are data, not
//! algorithm, and must match the engine byte for byte. Lists are `|`-
//! separated filename globs; composed engine constants are spelled out as
//! their literal values here.

/// System scripts, fonts and resources.
pub const C4CFN_SYSTEM: &str = "System.ocg";
/// Material definitions.
pub const C4CFN_MATERIAL: &str = "Material.ocg";
/// UI and skin graphics.
pub const C4CFN_GRAPHICS: &str = "Graphics.ocg";
/// Sound packs.
pub const C4CFN_SOUND: &str = "Sound.ocg";
/// Music packs.
pub const C4CFN_MUSIC: &str = "Music.ocg";
/// Scenario sections.
pub const C4CFN_SCENARIO_SECTIONS: &str = "Sect*.ocg";
/// Object definitions.
pub const C4CFN_DEF_FILES: &str = "*.ocd";
/// Player packs.
pub const C4CFN_PLAYER_FILES: &str = "*.ocp";
/// Object info.
pub const C4CFN_OBJECT_INFO_FILES: &str = "*.oci";
/// Scenarios.
pub const C4CFN_SCENARIO_FILES: &str = "*.ocs";
/// Scenario folders.
pub const C4CFN_FOLDER_FILES: &str = "*.ocf";

/// Child order inside a scenario (`*.ocs`).
pub const C4FLS_SCENARIO: &str = "Loader*.bmp|Loader*.png|Loader*.jpeg|Loader*.jpg|Fonts.txt|Scenario.txt|Title*.txt|Info.txt|Desc*.txt|Icon.png|Icon.bmp|Achv*.png|Game.txt|StringTbl*.txt|ParameterDefs.txt|Teams.txt|Parameters.txt|Info.txt|Sect*.ocg|Music.ocg|*.mid|*.wav|Desc*.txt|Title.png|Title.jpg|*.ocd|Script.c|Script*.c|Map.c|Objects.c|System.ocg|Material.ocg|MatMap.txt|Map.bmp|MapFg.bmp|MapBg.bmp|Landscape.bmp|LandscapeFg.bmp|LandscapeBg.bmp|DiffLandscape.bmp|DiffLandscapeBkg.bmp|Sky.bmp|Sky.png|Sky.jpeg|Sky.jpg|PXS.ocb|MassMover.ocb|CtrlRec.ocb|Strings.txt|Objects.txt|RoundResults.txt|Author.txt|Version.txt|Names.txt";

/// Child order inside a scenario section (`Sect*.ocg`).
pub const C4FLS_SECTION: &str = "Scenario.txt|Game.txt|Map.bmp|MapFg.bmp|MapBg.bmp|Landscape.bmp|LandscapeFg.bmp|LandscapeBg.bmp|Sky.bmp|Sky.png|Sky.jpeg|Sky.jpg|PXS.ocb|MassMover.ocb|CtrlRec.ocb|Strings.txt|Objects.txt|Objects.c";

/// Child order inside an object definition (`*.ocd`).
pub const C4FLS_DEF: &str = "*.glsl|*.png|*.bmp|*.jpeg|*.jpg|*.material|Particle.txt|DefCore.txt|*.wav|*.ogg|*.skeleton|Graphics.mesh|*.mesh|StringTbl*.txt|Script.c|Script*.c|C4Script.c|Names*.txt|Title*.txt|ClonkNames.txt|Rank.txt|Rank*.txt|Desc*.txt|Author.txt|Version.txt|*.ocd";

/// Child order inside a player pack (`*.ocp`).
pub const C4FLS_PLAYER: &str = "Player.txt|BigIcon.png|*.oci";

/// Child order inside an object info (`*.oci`).
pub const C4FLS_OBJECT: &str = "ObjectInfo.txt";

/// Child order inside a scenario folder (`*.ocf`).
pub const C4FLS_FOLDER: &str = "Folder.txt|Title*.txt|Info.txt|Desc*.txt|Title.png|Title.jpg|Icon.png|Icon.bmp|Author.txt|Version.txt|StringTbl*.txt|ParameterDefs.txt|Achv*.png|*.ocs|Loader*.bmp|Loader*.png|Loader*.jpeg|Loader*.jpg|FolderMap.txt|FolderMap.png";

/// Child order inside `Material.ocg`.
pub const C4FLS_MATERIAL: &str = "TexMap.txt|*.ocm|*.jpeg|*.jpg|*.bmp|*.png";

/// Child order inside `Graphics.ocg`.
pub const C4FLS_GRAPHICS: &str = "Loader*.bmp|Loader*.png|Loader*.jpeg|Loader*.jpg|*.glsl|Font*.png|GUIProgress.png|Endeavour.ttf|GUICaption.png|GUIButton.png|GUIButtonDown.png|GUIButtonHighlight.png|GUIButtonHighlightRound.png|GUIIcons.png|GUIIcons2.png|GUIScroll.png|GUIContext.png|GUISubmenu.png|GUICheckBox.png|GUIBigArrows.png|Control.png|ClonkSkins.png|Fire.png|Background.png|Flag.png|Crew.png|Wealth.png|Player.png|Rank.png|Captain.png|Cursor.png|SelectMark.png|MenuSymbol.png|Menu.png|Logo.png|Construction.png|Energy.png|Options.png|UpperBoard.png|Arrow.png|Exit.png|Hand.png|Gamepad.png|Build.png|TransformKnob.png|Achv*.png|StartupMainMenuBG.*|StartupScenSelBG.*|StartupPlrSelBG.*|StartupPlrPropBG.*|StartupNetworkBG.*|StartupAboutBG.*|StartupBigButton.png|StartupBigButtonDown.png|StartupBookScroll.png|StartupContext.png|StartupScenSelIcons.png|StartupScenSelTitleOv.png|StartupDlgPaper.png|StartupOptionIcons.png|StartupTabClip.png|StartupNetGetRef.png|StartupLogo.png";

/// Child order inside `System.ocg`.
pub const C4FLS_SYSTEM: &str = "*.hlp|*.cnt|Language*.txt|*.fon|*.fnt|*.ttf|*.ttc|*.fot|*.otf|Fonts.txt|StringTbl*.txt|PlayerControls.txt|*.c|Names.txt";

/// Child order inside `Sound.ocg` (sample formats, then subgroups).
pub const C4FLS_SOUND: &str = "*.wav|*.ogg|*.ocg";

/// Child order inside `Music.ocg`.
pub const C4FLS_MUSIC: &str = "*.ogg";

/// The sort-list catalogue: `(group glob, child sort list)` pairs.
///
/// Dispatch walks the pairs in declared order and the first glob matching
/// a group's name selects its list.
pub const SORT_CATALOGUE: [(&str, &str); 11] = [
    (C4CFN_SYSTEM, C4FLS_SYSTEM),
    (C4CFN_MATERIAL, C4FLS_MATERIAL),
    (C4CFN_GRAPHICS, C4FLS_GRAPHICS),
    (C4CFN_DEF_FILES, C4FLS_DEF),
    (C4CFN_PLAYER_FILES, C4FLS_PLAYER),
    (C4CFN_OBJECT_INFO_FILES, C4FLS_OBJECT),
    (C4CFN_SCENARIO_FILES, C4FLS_SCENARIO),
    (C4CFN_FOLDER_FILES, C4FLS_FOLDER),
    (C4CFN_SCENARIO_SECTIONS, C4FLS_SECTION),
    (C4CFN_SOUND, C4FLS_SOUND),
    (C4CFN_MUSIC, C4FLS_MUSIC),
];
