// Distress traffic between the Titanic (MGY) and the Carpathia (MPA).
use super::{Scenario, Turn};

pub static TITANIC: Scenario = Scenario {
    id: "titanic",
    title: "Titanic Distress Call",
    turns: &[
        Turn {
            send: "CQD CQD CQD DE MGY POSITION 41.44N 50.24W ICEBERG STRUCK SINKING K",
            translation: "Distress! This is Titanic at 41.44N 50.24W. Struck an iceberg, sinking.",
            receive: "MGY DE MPA R R RECEIVED YOUR CQD QSL QTH EN ROUTE K",
            receive_translation: "Titanic, this is Carpathia. Distress call received, we are en route.",
        },
        Turn {
            send: "MPA DE MGY FB TU ENGINE ROOM FLOODED NEED IMMEDIATE ASSIST K",
            translation: "Carpathia, thank you. Engine room flooded, we need immediate assistance.",
            receive: "MGY DE MPA R R ETA 4 HOURS HOLD POSITION LIFEBOATS READY? K",
            receive_translation: "Roger. ETA four hours. Hold position. Are the lifeboats ready?",
        },
        Turn {
            send: "MPA DE MGY R R LIFEBOATS IN USE PEOPLE ABANDON SHIP QRN HEAVY K",
            translation: "Lifeboats in use, passengers abandoning ship. Heavy interference.",
            receive: "MGY DE MPA FB STAY STRONG CUAGN HOPEFULLY 73 SK",
            receive_translation: "Stay strong. Hope to hear you again, 73.",
        },
    ],
};
